// src/app.rs (lightbox-ui)
//
// The viewer application: owns the collection, the navigation cursor, the
// decode cache and preloader, and the per-frame command queue. Display is
// resolve-then-commit: a navigation command resolves its target, decodes it
// (cache first), and only commits the cursor and collection once the new
// texture is actually on the GPU. A decode failure leaves everything where
// it was.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lightbox_core::{
    Collection, NavCursor, NavMode, PanDirection, ScrollSpeed, Slideshow, ViewerCommand,
};
use lightbox_media::{copy_to, decode_image, relocate, DecodeCache, Preloader};

use crate::input::{ComboState, COMBO_WINDOW};
use crate::lightbox_log;
use crate::settings::Settings;

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 16.0;
const ZOOM_IN_FACTOR: f32 = 1.1;
const ZOOM_OUT_FACTOR: f32 = 0.9;

/// How the current image is mapped onto the window.
#[derive(Debug)]
struct ViewState {
    zoom: f32,
    fit: bool,
    pan: egui::Vec2,
    /// Scale applied at the last paint — the base for relative zoom, so
    /// zooming out of fit mode starts from what the user actually sees.
    effective: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { zoom: 1.0, fit: true, pan: egui::Vec2::ZERO, effective: 1.0 }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct LightboxApp {
    collection: Collection,
    pub(crate) cursor: NavCursor,
    pub(crate) scroll: ScrollSpeed,
    pub(crate) slideshow: Slideshow,
    pub(crate) combo: ComboState,
    /// Commands emitted by the input layer each frame, processed after the UI pass
    pub(crate) pending_cmds: Vec<ViewerCommand>,
    settings: Settings,
    settings_path: Option<PathBuf>,
    cache: DecodeCache,
    preloader: Preloader,
    rng: StdRng,
    current_tex: Option<egui::TextureHandle>,
    view: ViewState,
    /// Transient status line plus its expiry.
    feedback_line: Option<(String, Instant)>,
    /// Destination palette stays up while a move/copy chord is pending.
    palette_until: Option<Instant>,
}

impl LightboxApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        images: Vec<String>,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let cache = DecodeCache::new();
        let preloader = Preloader::new(cache.clone());
        let slideshow =
            Slideshow::new(Duration::from_secs_f64(settings.slideshow_interval_secs.max(1.0)));

        let mut app = Self {
            collection: Collection::load(images),
            cursor: NavCursor::default(),
            scroll: ScrollSpeed::default(),
            slideshow,
            combo: ComboState::default(),
            pending_cmds: Vec::new(),
            settings,
            settings_path,
            cache,
            preloader,
            rng: StdRng::from_entropy(),
            current_tex: None,
            view: ViewState::default(),
            feedback_line: None,
            palette_until: None,
        };

        // Show the first displayable image; undecodable entries at the front
        // of the collection are skipped, not fatal.
        for i in 0..app.collection.len() {
            let Some(id) = app.collection.id_at(i).map(str::to_owned) else { break };
            if app.try_show(&cc.egui_ctx, &id) {
                app.collection.set_current(i);
                app.after_display(&cc.egui_ctx);
                break;
            }
        }
        app
    }

    pub(crate) fn feedback(&mut self, msg: impl Into<String>) {
        let expiry = Instant::now() + Duration::from_secs_f64(self.settings.feedback_secs.max(0.1));
        self.feedback_line = Some((msg.into(), expiry));
    }

    /// Decode `id` (cache first) and upload it as the current texture.
    /// Returns false — with the previous image left on screen — when the
    /// decode fails.
    fn try_show(&mut self, ctx: &egui::Context, id: &str) -> bool {
        let decoded = match self.cache.get(id) {
            Some(img) => img,
            None => match decode_image(id) {
                Ok(img) => self.cache.put(id.to_owned(), img),
                Err(e) => {
                    lightbox_log!("[display] {e:#}");
                    self.feedback(format!("can't display {}", file_name(id)));
                    return false;
                }
            },
        };
        let size = [decoded.width as usize, decoded.height as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &decoded.pixels);
        self.current_tex = Some(ctx.load_texture(id, image, egui::TextureOptions::LINEAR));
        self.view.pan = egui::Vec2::ZERO;
        true
    }

    /// Post-commit housekeeping: retitle the window and warm the cache with
    /// the logical neighbors of the new position.
    fn after_display(&mut self, ctx: &egui::Context) {
        if let Some(id) = self.collection.current_id() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "{} ({}/{}) - Lightbox",
                file_name(id),
                self.collection.current_index() + 1,
                self.collection.len(),
            )));
        }
        self.warm_neighbors();
    }

    fn warm_neighbors(&mut self) {
        let ids: Vec<String> = self
            .cursor
            .neighbors(&self.collection)
            .into_iter()
            .filter_map(|i| self.collection.id_at(i))
            .filter(|id| !self.cache.contains(id))
            .map(str::to_owned)
            .collect();
        self.preloader.warm(ids);
    }

    fn navigate(&mut self, ctx: &egui::Context, mode: NavMode, step: usize, forward: bool) {
        let resolved = if forward {
            self.cursor.advance(mode, step, &self.collection, &mut self.rng)
        } else {
            self.cursor.retreat(mode, step, &self.collection, &mut self.rng)
        };
        let Some(nav) = resolved else { return };
        let Some(id) = self.collection.id_at(nav.target).map(str::to_owned) else { return };
        if self.try_show(ctx, &id) {
            self.cursor.commit(nav, &mut self.collection);
            self.after_display(ctx);
        }
    }

    fn jump(&mut self, ctx: &egui::Context, to_first: bool) {
        if self.collection.is_empty() {
            return;
        }
        let index = if to_first { 0 } else { self.collection.len() - 1 };
        let Some(id) = self.collection.id_at(index).map(str::to_owned) else { return };
        if self.try_show(ctx, &id) {
            self.collection.set_current(index);
            self.cursor.resync(&self.collection);
            self.after_display(ctx);
        }
    }

    /// Display the entry the collection now points at (after a removal), or
    /// close the viewer when nothing is left.
    fn show_current_or_close(&mut self, ctx: &egui::Context) {
        if self.collection.is_empty() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if let Some(id) = self.collection.current_id().map(str::to_owned) {
            if self.try_show(ctx, &id) {
                self.after_display(ctx);
            }
        }
    }

    fn process_command(&mut self, ctx: &egui::Context, cmd: ViewerCommand, now: Instant) {
        match cmd {
            // ── Navigation ───────────────────────────────────────────────────
            ViewerCommand::Advance { mode, step } => self.navigate(ctx, mode, step, true),
            ViewerCommand::Retreat { mode, step } => self.navigate(ctx, mode, step, false),
            ViewerCommand::JumpFirst => self.jump(ctx, true),
            ViewerCommand::JumpLast => self.jump(ctx, false),

            // ── File operations ──────────────────────────────────────────────
            ViewerCommand::DeleteCurrent => {
                let trash = self.settings.trash();
                match self
                    .collection
                    .delete_current(|id| relocate(Path::new(id), &trash).map(|_| ()))
                {
                    Ok(Some(removed)) => {
                        self.cursor.invalidate();
                        self.feedback(format!("trashed {}", file_name(&removed)));
                        self.show_current_or_close(ctx);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        lightbox_log!("[trash] {e}");
                        self.feedback(format!("delete failed: {e}"));
                    }
                }
            }
            ViewerCommand::MoveCurrent(key) => match self.settings.destination(key) {
                None => self.feedback(format!("no destination bound to '{key}'")),
                Some(dest) => {
                    match self
                        .collection
                        .delete_current(|id| relocate(Path::new(id), &dest).map(|_| ()))
                    {
                        Ok(Some(removed)) => {
                            self.cursor.invalidate();
                            self.feedback(format!(
                                "moved {} to {}",
                                file_name(&removed),
                                dest.display()
                            ));
                            self.show_current_or_close(ctx);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            lightbox_log!("[move] {e}");
                            self.feedback(format!("move failed: {e}"));
                        }
                    }
                }
            },
            ViewerCommand::CopyCurrent(key) => match self.settings.destination(key) {
                None => self.feedback(format!("no destination bound to '{key}'")),
                Some(dest) => {
                    let Some(id) = self.collection.current_id().map(str::to_owned) else {
                        return;
                    };
                    match copy_to(Path::new(&id), &dest) {
                        Ok(_) => self.feedback(format!(
                            "copied {} to {}",
                            file_name(&id),
                            dest.display()
                        )),
                        Err(e) => {
                            lightbox_log!("[copy] {e}");
                            self.feedback(format!("copy failed: {e}"));
                        }
                    }
                }
            },

            // ── Slideshow ────────────────────────────────────────────────────
            ViewerCommand::ToggleSlideshow => {
                if self.slideshow.toggle(now) {
                    self.feedback(format!(
                        "slideshow every {:.0}s",
                        self.slideshow.interval().as_secs_f64()
                    ));
                } else {
                    self.feedback("slideshow stopped");
                }
            }
            ViewerCommand::GrowSlideshowInterval => {
                let iv = self.slideshow.grow_interval(now);
                self.feedback(format!("slideshow interval {:.1}s", iv.as_secs_f64()));
            }
            ViewerCommand::ShrinkSlideshowInterval => {
                let iv = self.slideshow.shrink_interval(now);
                self.feedback(format!("slideshow interval {:.1}s", iv.as_secs_f64()));
            }

            // ── View ─────────────────────────────────────────────────────────
            ViewerCommand::Pan { dir, amount } => {
                let delta = match dir {
                    PanDirection::Up => egui::vec2(0.0, amount),
                    PanDirection::Down => egui::vec2(0.0, -amount),
                    PanDirection::Left => egui::vec2(amount, 0.0),
                    PanDirection::Right => egui::vec2(-amount, 0.0),
                };
                self.view.pan += delta;
            }
            ViewerCommand::ZoomIn => {
                self.view.zoom = (self.view.effective * ZOOM_IN_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);
                self.view.fit = false;
            }
            ViewerCommand::ZoomOut => {
                self.view.zoom = (self.view.effective * ZOOM_OUT_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);
                self.view.fit = false;
            }
            ViewerCommand::ZoomTo(z) => {
                self.view.zoom = z.clamp(MIN_ZOOM, MAX_ZOOM);
                self.view.fit = false;
            }
            ViewerCommand::ZoomOneToOne => {
                self.view.zoom = 1.0;
                self.view.fit = false;
            }
            ViewerCommand::FitToWindow => {
                self.view.fit = true;
                self.view.pan = egui::Vec2::ZERO;
            }
            ViewerCommand::ToggleFullscreen => {
                let full = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!full));
            }

            // ── UI ───────────────────────────────────────────────────────────
            ViewerCommand::ShowDestinations => {
                self.palette_until = Some(now + COMBO_WINDOW);
            }
            ViewerCommand::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn paint_image(&mut self, ui: &mut egui::Ui) {
        let Some(tex) = &self.current_tex else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("no image").weak());
            });
            return;
        };
        let avail = ui.available_size();
        let img = tex.size_vec2();
        let scale = if self.view.fit {
            (avail.x / img.x).min(avail.y / img.y)
        } else {
            self.view.zoom
        };
        self.view.effective = scale;
        let rect = egui::Rect::from_center_size(ui.max_rect().center() + self.view.pan, img * scale);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(tex.id(), rect, uv, egui::Color32::WHITE);
    }

    fn paint_feedback(&mut self, ctx: &egui::Context, now: Instant) {
        let Some((msg, expiry)) = self.feedback_line.clone() else { return };
        if now >= expiry {
            self.feedback_line = None;
            return;
        }
        egui::Area::new(egui::Id::new("feedback_line"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&msg);
                });
            });
        ctx.request_repaint_after(expiry - now);
    }

    fn paint_palette(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(until) = self.palette_until else { return };
        if now >= until {
            self.palette_until = None;
            return;
        }
        egui::Area::new(egui::Id::new("destination_palette"))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new("destinations").strong());
                    ui.separator();
                    for (key, dir) in &self.settings.destinations {
                        ui.label(format!("{key}   {}", dir.display()));
                    }
                });
            });
        ctx.request_repaint_after(until - now);
    }
}

fn file_name(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_owned())
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for LightboxApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preloader.shutdown();
        // The slideshow interval is the one setting adjusted from inside the
        // viewer; persist it so S/Ctrl-S tuning sticks across sessions.
        self.settings.slideshow_interval_secs = self.slideshow.interval().as_secs_f64();
        if let Some(path) = self.settings_path.clone() {
            if let Err(e) = self.settings.save(&path) {
                lightbox_log!("[settings] {e:#}");
            }
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.handle_input(ctx);

        if self.slideshow.due(now) {
            self.pending_cmds.push(ViewerCommand::Advance { mode: self.cursor.mode(), step: 1 });
        }

        // ── Process commands emitted by the input layer this frame ────────────
        let cmds: Vec<ViewerCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(ctx, cmd, now);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.paint_image(ui);
            });

        self.paint_feedback(ctx, now);
        self.paint_palette(ctx, now);

        if let Some(wait) = self.slideshow.until_due(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
