use eframe::egui::{self, Color32, Context, Key, Modifiers, RichText, Sense};
use log::info;
use rfd::FileDialog;

use crate::color::{self, to_color32};
use crate::config::{EditorConfig, ImportMode};
use crate::editor::{Command, Outcome, Session};
use crate::resolution::Resolution;

pub struct SpriteApp {
    pub config: EditorConfig,
    pub session: Session,
    // UI state
    /// 单选框当前选中的分辨率，只在“New”时生效
    pub pending_resolution: Resolution,
    pub color_text: String,
    pub status: String,
}

impl SpriteApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        setup_theme(&cc.egui_ctx);
        let session = Session::new(&config);
        Self {
            pending_resolution: session.resolution(),
            color_text: color::to_hex_rgb(session.paint_color()),
            status: String::new(),
            session,
            config,
        }
    }

    /// 把命令交给会话，并把结果或错误写到状态栏
    fn run(&mut self, command: Command) {
        match self.session.apply(command) {
            Ok(Outcome::Opened { path, resolution }) => {
                // 单选框跟随导入图片推断出的分辨率
                self.pending_resolution = resolution;
                self.status = format!("Opened {} ({})", path.display(), resolution.label());
            }
            Ok(Outcome::Saved { path, format }) => {
                self.status = format!("Exported {} as {}", path.display(), format);
            }
            Ok(Outcome::Redraw | Outcome::Unchanged) => {}
            Err(e) => {
                self.status = format!("Error: {e}");
            }
        }
    }

    fn action_new(&mut self) {
        self.run(Command::New(self.pending_resolution));
        self.status = format!("New {} sprite", self.session.resolution().label());
    }

    fn action_open(&mut self) {
        let path = FileDialog::new().add_filter("Image", &["png", "jpg", "jpeg", "gif", "bmp"]).pick_file();
        if path.is_none() {
            info!("open dialog cancelled");
        }
        self.run(Command::Open(path));
    }

    fn action_save(&mut self) {
        let path = FileDialog::new().set_file_name("sprite.png").save_file();
        if path.is_none() {
            info!("save dialog cancelled");
        }
        self.run(Command::Save(path));
    }

    pub fn ui_toolbar(&mut self, ui: &mut egui::Ui) {
        if ui.button("New").clicked() {
            self.action_new();
        }
        if ui.button("Open").clicked() {
            self.action_open();
        }
        if ui.button("Save").clicked() {
            self.action_save();
        }
        ui.separator();
        ui.label(RichText::new(&self.status).color(Color32::DARK_GRAY));
    }

    pub fn ui_sidebar(&mut self, ui: &mut egui::Ui) {
        for r in Resolution::ALL {
            ui.radio_value(&mut self.pending_resolution, r, r.label());
        }
        ui.separator();
        ui.label("Colour RGB (Hexadecimal)");
        let edit = ui.add(egui::TextEdit::singleline(&mut self.color_text).char_limit(6).desired_width(80.0));
        if edit.changed() {
            self.run(Command::ColorText(self.color_text.clone()));
        }
        ui.horizontal(|ui| {
            let c = to_color32(self.session.paint_color());
            let (rect, _) = ui.allocate_exact_size(egui::vec2(24.0, 14.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, c);
            ui.label(RichText::new("Paint Colour").color(c));
        });
        ui.separator();
        let mut rescale = self.session.import_mode() == ImportMode::Rescale;
        if ui.checkbox(&mut rescale, "Rescale opened images").changed() {
            self.session.set_import_mode(if rescale { ImportMode::Rescale } else { ImportMode::Sample });
        }
    }

    pub fn ui_canvas(&mut self, ui: &mut egui::Ui) {
        let side = self.config.canvas_size;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        self.session.grid().render(rect.width(), rect.height(), |cell, c| {
            let r = egui::Rect::from_min_size(rect.min + egui::vec2(cell.x, cell.y), egui::vec2(cell.width, cell.height));
            painter.rect_filled(r, 0.0, to_color32(c));
        });

        // 按下与拖动都会给指针下的格子上色
        if response.clicked() || response.is_pointer_button_down_on() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                self.run(Command::Paint { x: local.x, y: local.y, canvas_width: rect.width(), canvas_height: rect.height() });
            }
        }
    }
}

fn setup_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::light());
}

impl eframe::App for SpriteApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| self.ui_toolbar(ui));
        });

        egui::SidePanel::left("left").resizable(false).default_width(180.0).show(ctx, |ui| {
            self.ui_sidebar(ui);
        });

        let backdrop = egui::Frame::central_panel(&ctx.style()).fill(self.config.backdrop);
        egui::CentralPanel::default().frame(backdrop).show(ctx, |ui| {
            self.ui_canvas(ui);
        });

        // 快捷键
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::N)) { self.action_new(); }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::O)) { self.action_open(); }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::S)) { self.action_save(); }
    }
}
