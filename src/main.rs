mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::Context;
use eframe::egui;

use app::DashboardApp;
use state::AppState;

/// Source dataset: hate crime incidents recorded in Austin, TX, 2017-2025.
const DATA_URL: &str =
    "https://raw.githubusercontent.com/mk123x/Hate-Crimes-Dashboard-DSPL/main/Hate_Crimes_2017-2025.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // One synchronous fetch per session; a failure here is terminal.
    let dataset = data::loader::fetch_dataset(DATA_URL).context("loading incident dataset")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hate Crime Incidents Trend Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(AppState::new(dataset))))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard: {e}"))?;

    Ok(())
}
