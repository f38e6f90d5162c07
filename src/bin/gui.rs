#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui::{Color32, Pos2, Rect, Stroke};
use egui_plot::{Line, Plot, PlotPoints};
use image::GenericImageView;
use std::{env, fs, path::Path};
use pipe_flow_lab::{
    config,
    flow::physics::{inlet_pressure_pa, GaugeLevel, MeterBand},
    flow::{ChartSeries, Fluid, PipeFlowSimulator, SimulatorOptions, TextInputs},
    i18n::{self, keys},
    pump::{compute_pump_performance, MotorThermalModel, PumpInput, PumpResult, TemperatureLevel},
    render::{Canvas, Rgba, Theme, Viewport},
};

const CANVAS_HEIGHT: f32 = 320.0;
const MAX_FLOW_SLIDER_L_S: f64 = 5.0;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 820.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("using default configuration: {e}");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(cli_lang.as_deref().unwrap_or("auto"), Some(app_cfg.language.as_str()));

    eframe::run_native(
        "Pipe Flow Lab",
        options,
        Box::new(move |cc| {
            apply_visuals(&cc.egui_ctx, app_cfg.theme);
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn apply_visuals(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    });
}

fn colour32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn gauge_colour(level: GaugeLevel) -> Color32 {
    match level {
        GaugeLevel::Success => Color32::from_rgb(34, 197, 94),
        GaugeLevel::Warning => Color32::from_rgb(245, 158, 11),
        GaugeLevel::Danger => Color32::from_rgb(239, 68, 68),
    }
}

fn temperature_colour(level: TemperatureLevel) -> Option<Color32> {
    match level {
        TemperatureLevel::Normal => None,
        TemperatureLevel::Warm => Some(Color32::from_rgb(245, 158, 11)),
        TemperatureLevel::Hot => Some(Color32::from_rgb(239, 68, 68)),
    }
}

/// egui 페인터 위에 그리는 캔버스. 좌표는 할당받은 영역의 좌상단 기준.
struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
}

impl EguiCanvas<'_> {
    fn at(&self, x: f32, y: f32) -> Pos2 {
        self.rect.min + egui::vec2(x, y)
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self, colour: Rgba) {
        self.painter.rect_filled(self.rect, 0.0, colour32(colour));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Rgba) {
        let min = self.at(x, y);
        let rect = Rect::from_min_size(min, egui::vec2(width.max(0.0), height.max(0.0)));
        self.painter.rect_filled(rect, 0.0, colour32(colour));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, colour: Rgba) {
        self.painter.circle_filled(self.at(cx, cy), radius, colour32(colour));
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, colour: Rgba) {
        self.painter.line_segment(
            [self.at(from.0, from.1), self.at(to.0, to.1)],
            Stroke::new(width, colour32(colour)),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    PipeFlow,
    Pump,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    sim: PipeFlowSimulator<TextInputs, ChartSeries>,
    flow_slider: f64,
    pending_theme: Option<Theme>,
    canvas_size: Option<egui::Vec2>,
    // 펌프
    pump_input: PumpInput,
    pump_result: Option<Result<PumpResult, String>>,
    pump_running: bool,
    thermal: MotorThermalModel,
    last_thermal_tick: f64,
}

impl GuiApp {
    fn new(config: config::Config, lang: &str) -> Self {
        let tr = i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref());
        let inputs = TextInputs::from_parameters(&config.initial);
        let sim = PipeFlowSimulator::new(
            inputs,
            ChartSeries::default(),
            SimulatorOptions {
                viewport: Viewport::from_container(1000.0, CANVAS_HEIGHT),
                theme: config.theme,
                pixels_per_m_s: config.particle_scale,
                seed: None,
            },
        );
        let pump_input = PumpInput {
            voltage_v: 220.0,
            current_a: 2.0,
            volume_l: 20.0,
            duration_s: 10.0,
            density_kg_m3: 1000.0,
            head_loss_m: 2.0,
        };
        let mut app = Self {
            flow_slider: config.initial.flow_rate_l_s,
            config,
            tr,
            tab: Tab::PipeFlow,
            sim,
            pending_theme: None,
            canvas_size: None,
            pump_input,
            pump_result: None,
            pump_running: false,
            thermal: MotorThermalModel::default(),
            last_thermal_tick: 0.0,
        };
        app.recompute_pump();
        app
    }

    fn recompute_pump(&mut self) {
        self.pump_result = Some(compute_pump_performance(&self.pump_input).map_err(|e| e.to_string()));
    }

    /// 설정의 테마를 뒤집는다. 시뮬레이터는 다음 캔버스 프레임에서 따라온다.
    fn next_theme(&mut self) -> Theme {
        let theme = self.config.theme.toggled();
        self.config.theme = theme;
        self.pending_theme = Some(theme);
        theme
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.next_theme();
        apply_visuals(ctx, theme);
        if let Err(e) = self.config.save() {
            log::warn!("failed to save theme: {e}");
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        egui::Grid::new("pipe_inputs").num_columns(2).show(ui, |ui| {
            ui.label("L [m]");
            changed |= ui.text_edit_singleline(&mut self.sim.source_mut().length).changed();
            ui.end_row();

            ui.label("D [m]");
            changed |= ui.text_edit_singleline(&mut self.sim.source_mut().diameter).changed();
            ui.end_row();

            ui.label("Q [L/s]");
            let slider = egui::Slider::new(&mut self.flow_slider, 0.0..=MAX_FLOW_SLIDER_L_S).fixed_decimals(1);
            if ui.add(slider).changed() {
                self.sim.source_mut().flow_rate = format!("{:.1}", self.flow_slider);
                changed = true;
            }
            ui.end_row();

            ui.label("Fluid");
            let current = Fluid::from_code(&self.sim.source().fluid).unwrap_or_default();
            let mut selected = current;
            egui::ComboBox::from_id_source("fluid_choice")
                .selected_text(selected.name())
                .show_ui(ui, |ui| {
                    for fluid in Fluid::ALL {
                        ui.selectable_value(&mut selected, fluid, fluid.name());
                    }
                });
            if selected != current {
                self.sim.source_mut().fluid = selected.name().to_string();
                changed = true;
            }
            ui.end_row();
        });
        if changed {
            self.sim.mark_dirty();
        }
    }

    fn ui_readouts(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let result = self.sim.result();
        let params = self.sim.parameters();
        let p1 = inlet_pressure_pa(params, result);
        let regime = if result.is_laminar() {
            tr.t(keys::REGIME_LAMINAR)
        } else {
            tr.t(keys::REGIME_TURBULENT)
        };
        egui::Grid::new("pipe_readouts").num_columns(2).show(ui, |ui| {
            ui.label(tr.t(keys::RESULT_VELOCITY));
            ui.label(format!("{:.3} m/s", result.velocity_m_s));
            ui.end_row();
            ui.label(tr.t(keys::RESULT_REYNOLDS));
            ui.label(format!("{:.0} ({regime})", result.reynolds));
            ui.end_row();
            ui.label(tr.t(keys::RESULT_FRICTION));
            ui.label(format!("{:.4}", result.friction_factor));
            ui.end_row();
            ui.label(tr.t(keys::RESULT_HEAD_LOSS));
            ui.label(format!("{:.3} m", result.head_loss_m));
            ui.end_row();
            ui.label(tr.t(keys::RESULT_INLET_PRESSURE));
            let band = match MeterBand::classify(p1) {
                MeterBand::Low => "low",
                MeterBand::Medium => "medium",
                MeterBand::High => "high",
            };
            ui.colored_label(
                gauge_colour(GaugeLevel::classify(p1)),
                format!("{:.0} Pa ({band})", p1.round()),
            );
            ui.end_row();
        });
    }

    fn ui_pipe_canvas(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        let size = egui::vec2(ui.available_width(), CANVAS_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let mut canvas = EguiCanvas {
            painter: &painter,
            rect: response.rect,
        };

        if self.canvas_size != Some(response.rect.size()) {
            self.canvas_size = Some(response.rect.size());
            self.sim.resize(response.rect.width(), response.rect.height(), &mut canvas);
        }
        if let Some(theme) = self.pending_theme.take() {
            self.sim.set_theme(theme, &mut canvas);
        }
        self.sim.frame(now_ms, Some(&mut canvas));
    }

    fn ui_chart(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.label(tr.t(keys::GUI_CHART_TITLE));
        let points = PlotPoints::from(self.sim.chart().points());
        Plot::new("head_loss_chart")
            .height(220.0)
            .x_axis_label(tr.t(keys::GUI_CHART_X))
            .y_axis_label(tr.t(keys::GUI_CHART_Y))
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).name(tr.t(keys::GUI_CHART_TITLE)));
            });
    }

    fn ui_pipe_flow(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| self.ui_inputs(ui));
            ui.separator();
            ui.vertical(|ui| self.ui_readouts(ui));
        });
        ui.separator();
        self.ui_pipe_canvas(ui, now_ms);
        ui.separator();
        self.ui_chart(ui);
    }

    /// 1초마다 온도 모델을 진행한다. 보이는 탭과 상관없이 매 갱신에서 부른다.
    fn tick_thermal(&mut self, now_s: f64) {
        if now_s - self.last_thermal_tick < 1.0 {
            return;
        }
        self.last_thermal_tick = now_s;
        let (power, eff) = match &self.pump_result {
            Some(Ok(r)) => (r.input_power_w, r.efficiency_pct),
            _ => (0.0, 0.0),
        };
        self.thermal.tick(self.pump_running, power, eff);
    }

    fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        // 다른 탭에 있는 동안 멈춘 시간만큼 입자가 튀지 않게
        if tab == Tab::PipeFlow {
            self.sim.reset_clock();
        }
        self.tab = tab;
    }

    fn ui_pump(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let mut changed = false;
        egui::Grid::new("pump_inputs").num_columns(2).show(ui, |ui| {
            let rows: [(&str, &mut f64); 6] = [
                (keys::PROMPT_VOLTAGE, &mut self.pump_input.voltage_v),
                (keys::PROMPT_CURRENT, &mut self.pump_input.current_a),
                (keys::PROMPT_VOLUME, &mut self.pump_input.volume_l),
                (keys::PROMPT_DURATION, &mut self.pump_input.duration_s),
                (keys::PROMPT_DENSITY, &mut self.pump_input.density_kg_m3),
                (keys::PROMPT_HEAD_LOSS, &mut self.pump_input.head_loss_m),
            ];
            for (key, value) in rows {
                ui.label(tr.t(key));
                changed |= ui.add(egui::DragValue::new(value).speed(0.1)).changed();
                ui.end_row();
            }
        });
        if changed {
            self.recompute_pump();
        }

        ui.separator();
        match &self.pump_result {
            Some(Ok(r)) => {
                ui.label(pipe_flow_lab::ui_cli::format_pump_result(&tr, r));
            }
            Some(Err(msg)) => {
                ui.colored_label(Color32::from_rgb(239, 68, 68), msg);
            }
            None => {}
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.pump_running, egui::Button::new(tr.t(keys::GUI_PUMP_START)))
                .clicked()
            {
                self.pump_running = true;
            }
            if ui
                .add_enabled(self.pump_running, egui::Button::new(tr.t(keys::GUI_PUMP_STOP)))
                .clicked()
            {
                self.pump_running = false;
            }
        });

        let temp = self.thermal.temperature_c();
        let text = format!("{} {:.0} °C", tr.t(keys::RESULT_TEMPERATURE), temp.round());
        match temperature_colour(self.thermal.level()) {
            Some(colour) => ui.colored_label(colour, text),
            None => ui.label(text),
        };
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now_s = ctx.input(|i| i.time);
        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::GUI_TITLE));
                ui.separator();
                for (tab, key) in [(Tab::PipeFlow, keys::GUI_TAB_PIPE), (Tab::Pump, keys::GUI_TAB_PUMP)] {
                    if ui.selectable_label(self.tab == tab, tr.t(key)).clicked() {
                        self.select_tab(tab);
                    }
                }
                ui.separator();
                if ui.button(tr.t(keys::GUI_THEME_TOGGLE)).clicked() {
                    self.toggle_theme(ctx);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::PipeFlow => self.ui_pipe_flow(ui, now_s * 1000.0),
                    Tab::Pump => self.ui_pump(ui),
                });
        });

        self.tick_thermal(now_s);
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.sim.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_conversion_keeps_alpha() {
        let c = colour32(Rgba::new(10, 20, 30, 255));
        assert_eq!(c, Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn normal_temperature_has_no_highlight() {
        assert!(temperature_colour(TemperatureLevel::Normal).is_none());
        assert!(temperature_colour(TemperatureLevel::Hot).is_some());
    }

    #[test]
    fn theme_toggles_back_while_canvas_is_hidden() {
        let mut app = GuiApp::new(config::Config::default(), "en");
        app.select_tab(Tab::Pump);
        assert_eq!(app.next_theme(), Theme::Light);
        assert_eq!(app.next_theme(), Theme::Dark);
        assert_eq!(app.pending_theme, Some(Theme::Dark));
        assert_eq!(app.config.theme, Theme::Dark);
    }

    #[test]
    fn motor_heats_while_pipe_tab_is_shown() {
        let mut app = GuiApp::new(config::Config::default(), "en");
        app.pump_running = true;
        assert_eq!(app.tab, Tab::PipeFlow);
        for s in 1..=5 {
            app.tick_thermal(s as f64);
        }
        assert!(app.thermal.temperature_c() > 25.0);
    }

    #[test]
    fn app_starts_on_pipe_tab_with_pump_result() {
        let app = GuiApp::new(config::Config::default(), "en");
        assert_eq!(app.tab, Tab::PipeFlow);
        assert!(matches!(app.pump_result, Some(Ok(_))));
        assert_eq!(app.sim.theme(), Theme::Dark);
    }
}
