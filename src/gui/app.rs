//! Review Dashboard Main Application
//! Main window with control panel and dashboard view.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::session::{build_view, DashboardView, Session};
use egui::{FontData, FontDefinitions, FontFamily, SidePanel};
use std::path::{Path, PathBuf};

/// System fonts with Hangul coverage, tried in order when no font is configured.
const CJK_FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/NanumGothic.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// Main application window.
pub struct DashboardApp {
    session: Session,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: DashboardView,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        Self::install_fonts(&cc.egui_ctx, session.config.font_path.as_deref());

        let control_panel =
            ControlPanel::new(session.config.data_path.clone(), session.table.len());
        let chart_viewer = ChartViewer::new(
            session.config.date_format.clone(),
            session.config.columns.clone(),
        );
        let view = build_view(&session, &control_panel.settings);

        Self {
            session,
            control_panel,
            chart_viewer,
            view,
        }
    }

    /// Register a Hangul-capable font ahead of egui's bundled fonts.
    fn install_fonts(ctx: &egui::Context, configured: Option<&Path>) {
        let candidates: Vec<PathBuf> = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(CJK_FONT_CANDIDATES.iter().map(PathBuf::from))
            .collect();

        let Some((path, bytes)) = candidates
            .iter()
            .find_map(|p| std::fs::read(p).ok().map(|bytes| (p, bytes)))
        else {
            log::warn!("No CJK font found; Korean labels may not render");
            return;
        };

        let mut fonts = FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), FontData::from_owned(bytes).into());
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .insert(0, "cjk".to_owned());
        }
        ctx.set_fonts(fonts);
        log::info!("Using font {}", path.display());
    }

    /// Recompute every aggregate for the new settings.
    fn handle_settings_changed(&mut self) {
        self.view = build_view(&self.session, &self.control_panel.settings);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SettingsChanged => self.handle_settings_changed(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &self.view, self.control_panel.settings.interval);
        });
    }
}
