//! Page routing for the portfolio shell

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Generator,
    Gallery,
    About,
    NotFound(String),
}

impl Page {
    /// Pages listed in the sidebar, in order
    pub const NAV: [Page; 3] = [Page::Generator, Page::Gallery, Page::About];

    pub fn from_route(route: &str) -> Self {
        let path = route.trim().trim_end_matches('/');
        match path {
            "" | "/generate" => Page::Generator,
            "/gallery" => Page::Gallery,
            "/about" => Page::About,
            _ => Page::NotFound(route.to_string()),
        }
    }

    pub fn route(&self) -> &str {
        match self {
            Page::Generator => "/",
            Page::Gallery => "/gallery",
            Page::About => "/about",
            Page::NotFound(route) => route,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Generator => "Create",
            Page::Gallery => "Gallery",
            Page::About => "About",
            Page::NotFound(_) => "Not Found",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Generator => egui_phosphor::regular::PAINT_BRUSH,
            Page::Gallery => egui_phosphor::regular::IMAGES,
            Page::About => egui_phosphor::regular::INFO,
            Page::NotFound(_) => egui_phosphor::regular::WARNING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_to_pages() {
        assert_eq!(Page::from_route("/"), Page::Generator);
        assert_eq!(Page::from_route("/gallery/"), Page::Gallery);
        assert_eq!(Page::from_route("/about"), Page::About);
        assert_eq!(Page::from_route("/missing"), Page::NotFound("/missing".into()));
    }

    #[test]
    fn stale_saved_route_restores_not_found() {
        let mut settings = crate::settings::Settings::default();
        assert_eq!(Page::from_route(&settings.last_route), Page::Generator);

        settings.last_route = "/history".into();
        let page = Page::from_route(&settings.last_route);
        assert_eq!(page, Page::NotFound("/history".into()));
        assert_eq!(page.route(), "/history");
        assert_eq!(page.title(), "Not Found");
    }

    #[test]
    fn nav_pages_round_trip_through_routes() {
        for page in Page::NAV {
            assert_eq!(Page::from_route(page.route()), page);
        }
    }
}
