// Application state for HTTP handlers
use crate::application::alert_service::AlertService;
use crate::application::scan_service::ScanService;
use crate::application::trend_service::TrendService;
use crate::domain::trend::ChartCanvas;

#[derive(Clone)]
pub struct AppState {
    pub trend_service: TrendService,
    pub alert_service: AlertService,
    pub scan_service: ScanService,
    pub default_canvas: ChartCanvas,
}
