//! Service health probe

use super::App;
use crate::api::probe_health;
use crate::types::{HealthStatus, ServiceStatus};
use eframe::egui;
use tracing::{info, warn};

const HEALTH_OK_KEY: &str = "health_ok";
const HEALTH_ERR_KEY: &str = "health_error";

impl App {
    pub fn check_service_health(&mut self, ctx: &egui::Context) {
        if self.service_status == ServiceStatus::Checking {
            return;
        }
        self.service_status = ServiceStatus::Checking;

        let ctx = ctx.clone();
        let api_url = self.api_url.clone();
        info!(url = %api_url, "Checking art service health");

        std::thread::spawn(move || {
            match probe_health(&api_url) {
                Ok(health) => {
                    info!(status = %health.status, model = %health.model, device = %health.device, "Art service online");
                    ctx.memory_mut(|mem| mem.data.insert_temp(HEALTH_OK_KEY.into(), health));
                }
                Err(e) => {
                    warn!(error = %e, "Art service health check failed");
                    ctx.memory_mut(|mem| mem.data.insert_temp(HEALTH_ERR_KEY.into(), e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    pub fn poll_health_results(&mut self, ctx: &egui::Context) {
        if let Some(health) = ctx.memory(|mem| mem.data.get_temp::<HealthStatus>(HEALTH_OK_KEY.into())) {
            ctx.memory_mut(|mem| mem.data.remove::<HealthStatus>(HEALTH_OK_KEY.into()));
            self.service_status = ServiceStatus::Online(health);
        }

        if let Some(err) = ctx.memory(|mem| mem.data.get_temp::<String>(HEALTH_ERR_KEY.into())) {
            ctx.memory_mut(|mem| mem.data.remove::<String>(HEALTH_ERR_KEY.into()));
            self.service_status = ServiceStatus::Offline(err);
        }
    }
}
