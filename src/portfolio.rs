//! The shared portfolio context
//!
//! Owns the scene and every component that reads or animates it. The window
//! feeds it input and calls `tick` once per frame; the renderer reads it.

use glam::{Vec2, Vec3};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animators::{
    ClockAnimator, FanAnimator, KeycapAnimator, ScaleLightAnimator, SpinAnimator, SpinOutcome,
    SteamAnimator, TrailPool,
};
use crate::assets::{AssetLoader, LoadedAsset, SceneData, TextureVariant};
use crate::binder::bind_scene;
use crate::camera::{
    Camera, CameraCoordinator, OrbitControls, PoseTable, DEFAULT_POSE, INTRO_POSE,
    WHITEBOARD_POSE,
};
use crate::config::PortfolioConfig;
use crate::controls::{CupLid, Mailbox, MailboxOutcome, Pig};
use crate::interaction::descriptor::{ModalKind, NodeDescriptor, ToggleKind};
use crate::interaction::picker::intersect_object;
use crate::interaction::{
    dispatch_click, Cursor, HoverChange, HoverResponder, HoverScaler, InteractionTarget,
    Intersection, PointerPicker, Route,
};
use crate::materials::TextureSet;
use crate::registry::InteractiveRegistry;
use crate::scene_graph::{ObjectId, Scene};
use crate::sound::SoundBoard;
use crate::theme::ThemeController;
use crate::ui::{LoadingScreen, Modals, ShellAction, ShellView, SidePanel};
use crate::whiteboard::Whiteboard;

pub struct TextureUpload {
    pub set: TextureSet,
    pub variant: TextureVariant,
    pub image: Option<RgbaImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Escape,
    Character(&'a str),
}

pub struct Portfolio {
    pub config: PortfolioConfig,
    pub scene: Scene,
    pub registry: InteractiveRegistry,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub coordinator: CameraCoordinator,
    pub theme: ThemeController,
    pub whiteboard: Whiteboard,
    pub trails: TrailPool,

    picker: PointerPicker,
    hover: HoverResponder,
    hover_scaler: HoverScaler,

    fans: FanAnimator,
    clock: ClockAnimator,
    steam: SteamAnimator,
    spins: SpinAnimator,
    keycaps: KeycapAnimator,
    lights: ScaleLightAnimator,

    mailbox: Mailbox,
    cup_lid: CupLid,
    pig: Pig,
    sound: SoundBoard,

    modals: Modals,
    loading: LoadingScreen,
    panel: SidePanel,

    assets: Option<AssetLoader>,
    texture_uploads: Vec<TextureUpload>,

    embedded_page_interactive: bool,
    pointer: Option<Vec2>,
    pointer_moved: bool,
    pointer_held: bool,
    now: f64,
    rng: StdRng,
}

impl Portfolio {
    pub fn new(config: PortfolioConfig, sound: SoundBoard, assets: Option<AssetLoader>) -> Self {
        let tuning = config.tuning.clone();
        let registry = InteractiveRegistry::default();
        let theme = ThemeController::new(tuning.theme_duration);
        let lights = ScaleLightAnimator::new(theme.mix());

        let mut camera = Camera::default();
        let mut controls = OrbitControls::default();
        let mut coordinator = CameraCoordinator::new(PoseTable::new(config.poses.clone()));
        if !coordinator.snap_to(INTRO_POSE, &mut camera, &mut controls) {
            coordinator.snap_to(DEFAULT_POSE, &mut camera, &mut controls);
        }
        // Nothing moves behind the loading screen
        controls.set_enabled(false);

        let mut loading = LoadingScreen::default();
        if assets.is_none() {
            loading.set_progress(1.0);
        }

        Self {
            whiteboard: Whiteboard::new(&config.whiteboard),
            trails: TrailPool::new(tuning.particle_pool_size, tuning.particle_lifetime),
            picker: PointerPicker::default(),
            hover: HoverResponder::default(),
            hover_scaler: HoverScaler::new(tuning.hover_scale),
            fans: FanAnimator::new(tuning.fan_increment, &registry),
            clock: ClockAnimator::new(
                &registry,
                tuning.clock_axis,
                tuning.clock_utc_offset_minutes,
            ),
            steam: SteamAnimator::default(),
            spins: SpinAnimator::new(tuning.spin_duration, tuning.spin_cooldown),
            keycaps: KeycapAnimator::default(),
            lights,
            mailbox: Mailbox::new(&registry),
            cup_lid: CupLid::new(&registry),
            pig: Pig::new(tuning.oink_cooldown),
            sound,
            modals: Modals::new(tuning.modal_fade),
            loading,
            panel: SidePanel::default(),
            assets,
            texture_uploads: Vec::new(),
            embedded_page_interactive: false,
            pointer: None,
            pointer_moved: false,
            pointer_held: false,
            now: 0.0,
            rng: StdRng::from_entropy(),
            scene: Scene::new(),
            registry,
            camera,
            controls,
            coordinator,
            theme,
            config,
        }
    }

    /// One frame. Returns the new cursor when it changed.
    pub fn tick(&mut self, dt: f32) -> Option<Cursor> {
        self.now += dt as f64;

        self.drain_assets();

        let arrived = self
            .coordinator
            .update(dt, &mut self.camera, &mut self.controls);
        if arrived.is_some() {
            let allowed = self.orbit_allowed();
            self.controls.set_enabled(allowed);
        }

        self.run_animators(dt);
        self.scene.update_world_transforms();

        let cursor = self.pick_and_hover();
        self.paint_whiteboard();

        cursor
    }

    fn drain_assets(&mut self) {
        let Some(assets) = self.assets.as_mut() else {
            return;
        };

        let loaded = assets.drain();
        let progress = assets.progress();
        if assets.is_finished() {
            log::info!("All assets loaded");
            self.assets = None;
        }

        for asset in loaded {
            match asset {
                LoadedAsset::Scene(Ok(data)) => self.install_scene(data),
                LoadedAsset::Scene(Err(err)) => {
                    log::warn!("{:#}; the room stays empty", err);
                }
                LoadedAsset::Texture {
                    set,
                    variant,
                    image,
                } => self.texture_uploads.push(TextureUpload {
                    set,
                    variant,
                    image,
                }),
                LoadedAsset::Audio { clip, available } => {
                    if !available {
                        self.sound.mark_missing(&clip);
                    }
                }
            }
        }

        self.loading.set_progress(progress);
    }

    /// Spawns the loaded scene and classifies it. Runs once per scene message.
    pub fn install_scene(&mut self, data: SceneData) {
        let Some(gltf_scene) = data
            .document
            .default_scene()
            .or_else(|| data.document.scenes().next())
        else {
            log::warn!("Scene file contains no scenes");
            return;
        };

        self.scene
            .spawn_gltf_scene(&data.buffers, &gltf_scene);
        self.rebind();
    }

    /// Rebuilds the registry and everything derived from it.
    pub fn rebind(&mut self) {
        let bound = bind_scene(
            &mut self.scene,
            &self.config.social_links,
            &self.theme.mix(),
        );
        self.registry = bound.registry;

        let missing: Vec<&TextureSet> = bound
            .texture_sets
            .iter()
            .filter(|set| !self.config.assets.texture_sets.contains(set))
            .collect();
        if !missing.is_empty() {
            log::warn!("Texture sets {:?} are not configured; they render white", missing);
        }

        let tuning = &self.config.tuning;
        self.fans = FanAnimator::new(tuning.fan_increment, &self.registry);
        self.clock = ClockAnimator::new(
            &self.registry,
            tuning.clock_axis,
            tuning.clock_utc_offset_minutes,
        );
        self.mailbox = Mailbox::new(&self.registry);
        self.cup_lid = CupLid::new(&self.registry);
    }

    fn run_animators(&mut self, dt: f32) {
        self.theme.update(dt);
        self.modals.update(dt);
        self.loading.update(dt);

        self.fans.update(&mut self.scene);
        self.clock.update(&mut self.scene);
        self.steam.update(dt);
        self.trails.update(dt);
        self.spins.update(dt, &mut self.scene);
        self.keycaps.update(dt, &mut self.scene);
        self.lights.update(&mut self.scene, &self.registry);
        self.hover_scaler.update(dt, &mut self.scene);

        self.mailbox.update(dt, &mut self.scene);
        self.cup_lid.update(dt, &mut self.scene);
        self.pig.update(dt, &mut self.scene);
    }

    /// Orbit runs only when resting at the default pose with the page passive.
    fn orbit_allowed(&self) -> bool {
        !self.embedded_page_interactive
            && !self.coordinator.is_transitioning()
            && self.coordinator.current_pose() == Some(DEFAULT_POSE)
    }

    fn picking_allowed(&self) -> bool {
        !self.modals.is_blocking()
            && !self.loading.is_visible()
            && !self.whiteboard.is_drawing()
            && !self.embedded_page_interactive
    }

    fn pick_and_hover(&mut self) -> Option<Cursor> {
        self.picker.set_enabled(self.picking_allowed());

        // Overlays and draw mode drop the hover so no outline or pointer lingers
        if !self.picker.is_enabled() {
            self.pointer_moved = false;
            let change = self.hover.clear();
            self.hover_scaler
                .on_hover_change(change, &self.scene, &self.registry);
            return match change {
                HoverChange::Changed { cursor, .. } => Some(cursor),
                HoverChange::Unchanged => None,
            };
        }

        let hits: &[Intersection] = match self.pointer {
            Some(ndc) => self
                .picker
                .update(ndc, &self.camera, &self.scene, &self.registry),
            None => {
                self.picker.clear();
                &[]
            }
        };

        let change = self.hover.respond(hits, &self.scene);
        self.hover_scaler
            .on_hover_change(change, &self.scene, &self.registry);

        if self.pointer_moved {
            if let Some(hit) = hits.first() {
                self.trails.spawn(hit.point + hit.normal * 0.01);
            }
            self.pointer_moved = false;
        }

        match change {
            HoverChange::Changed { cursor, .. } => Some(cursor),
            HoverChange::Unchanged => None,
        }
    }

    fn paint_whiteboard(&mut self) {
        if !self.whiteboard.is_drawing() || !self.pointer_held || self.coordinator.is_transitioning() {
            return;
        }

        let (Some(ndc), Some(board)) = (self.pointer, self.registry.whiteboard) else {
            return;
        };

        let ray = self.camera.ray_from_ndc(ndc);
        match intersect_object(&ray, &self.scene, board) {
            Some(hit) => self.whiteboard.stroke_to(hit.uv),
            None => self.whiteboard.end_stroke(),
        }
    }

    pub fn pointer_moved(&mut self, ndc: Vec2) {
        self.pointer = Some(ndc);
        self.pointer_moved = true;
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.pointer_held = false;
        self.whiteboard.end_stroke();
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer_held = true;
    }

    pub fn pointer_released(&mut self) {
        self.pointer_held = false;
        self.whiteboard.end_stroke();
    }

    pub fn drag(&mut self, delta: Vec2) {
        if self.whiteboard.is_drawing() {
            return;
        }
        self.controls.rotate(delta.x, delta.y, &mut self.camera);
    }

    pub fn scroll(&mut self, lines: f32) {
        self.controls.zoom(lines, &mut self.camera);
    }

    pub fn resize(&mut self, resolution: Vec2) {
        self.camera.set_resolution(resolution);
    }

    /// A press and release without a drag in between.
    pub fn click(&mut self) -> Route {
        if self.loading.is_visible() {
            return Route::Ignored;
        }

        let nearest = if self.embedded_page_interactive {
            self.screen_hit()
        } else {
            self.picker.nearest().map(|hit| hit.object)
        };

        let descriptor: Option<(ObjectId, NodeDescriptor)> = nearest.and_then(|id| {
            self.scene
                .get_object(id)
                .map(|object| (id, object.descriptor.clone()))
        });

        let route = dispatch_click(
            descriptor.as_ref().map(|(id, descriptor)| (*id, descriptor)),
            self,
        );
        if route != Route::Ignored {
            log::debug!("Click routed to {:?}", route);
        }
        route
    }

    fn screen_hit(&self) -> Option<ObjectId> {
        let ndc = self.pointer?;
        let screen = self.registry.screen?;
        let ray = self.camera.ray_from_ndc(ndc);

        intersect_object(&ray, &self.scene, screen).map(|hit| hit.object)
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.loading.is_visible() {
            return;
        }

        match key {
            Key::Escape => {
                self.modals.close_open();
            }
            Key::Character(text) => {
                let text = text.to_lowercase();
                match text.as_str() {
                    "t" => {
                        self.theme.toggle();
                    }
                    "o" => self.enter_whiteboard(),
                    "p" => self.leave_whiteboard(),
                    "i" => self.toggle_embedded_page(),
                    _ => {}
                }
                self.keycaps.press(&text, &self.registry);
            }
        }
    }

    pub fn leave_whiteboard(&mut self) {
        self.whiteboard.set_draw_mode(false);
        if self.coordinator.current_pose() == Some(WHITEBOARD_POSE) {
            self.coordinator.reset_to_default(
                self.config.tuning.camera_duration,
                None,
                &self.camera,
                &mut self.controls,
            );
        }
    }

    pub fn toggle_embedded_page(&mut self) {
        self.embedded_page_interactive = !self.embedded_page_interactive;

        if self.embedded_page_interactive {
            self.controls.set_enabled(false);
        } else if self.orbit_allowed() {
            self.controls.set_enabled(true);
        }

        log::info!(
            "Embedded page {}",
            if self.embedded_page_interactive {
                "interactive"
            } else {
                "passive"
            }
        );
    }

    pub fn apply_action(&mut self, action: ShellAction) {
        match action {
            ShellAction::Enter => {
                if self.loading.enter() {
                    let ambient = self.config.assets.ambient_clip.clone();
                    self.sound.play_ambient(&ambient);
                    self.coordinator.zoom_to(
                        DEFAULT_POSE,
                        self.config.tuning.camera_duration,
                        None,
                        &self.camera,
                        &mut self.controls,
                    );
                }
            }
            ShellAction::OpenModal(kind) => {
                self.panel.close();
                self.open_modal(kind);
            }
            ShellAction::CloseModal(kind) => {
                self.modals.close(kind);
            }
            ShellAction::ToggleTheme => {
                self.theme.toggle();
            }
            ShellAction::ToggleSound => {
                self.sound.toggle_mute();
            }
            ShellAction::TogglePanel => {
                self.panel.toggle();
            }
            ShellAction::ClearWhiteboard => self.whiteboard.clear(),
            ShellAction::BrushColor(index) => self.whiteboard.set_color(index),
            ShellAction::LeaveWhiteboard => self.leave_whiteboard(),
            ShellAction::LeaveEmbeddedPage => {
                if self.embedded_page_interactive {
                    self.toggle_embedded_page();
                }
            }
        }
    }

    pub fn shell_view(&self) -> ShellView<'_> {
        ShellView {
            loading: &self.loading,
            modals: &self.modals,
            contents: &self.config.modals,
            panel: &self.panel,
            theme: self.theme.theme(),
            muted: self.sound.is_muted(),
            whiteboard: self.whiteboard.is_drawing().then_some(&self.whiteboard),
            embedded_page: self
                .embedded_page_interactive
                .then_some(self.config.embedded_page_url.as_str()),
        }
    }

    pub fn take_texture_uploads(&mut self) -> Vec<TextureUpload> {
        std::mem::take(&mut self.texture_uploads)
    }

    pub fn hover(&self) -> &HoverResponder {
        &self.hover
    }

    pub fn steam_time(&self) -> f32 {
        self.steam.time()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn modals(&self) -> &Modals {
        &self.modals
    }

    fn open_url(&self, url: &str) {
        if let Err(err) = webbrowser::open(url) {
            log::warn!("Failed to open {}: {}", url, err);
        }
    }

    fn object_position(&self, object: ObjectId) -> Vec3 {
        self.scene
            .get_object(object)
            .map(|object| object.world_position())
            .unwrap_or(Vec3::ZERO)
    }
}

impl InteractionTarget for Portfolio {
    fn embedded_page_interactive(&self) -> bool {
        self.embedded_page_interactive
    }

    fn open_embedded_page(&mut self) {
        let url = self.config.embedded_page_url.clone();
        self.open_url(&url);
    }

    fn open_modal(&mut self, kind: ModalKind) {
        if self.modals.open(kind) {
            let clip = self.config.assets.click_clip.clone();
            self.sound.play(&clip);
        }
    }

    fn open_link(&mut self, link: usize) {
        match self.config.social_links.get(link) {
            Some(link) => self.open_url(&link.url),
            None => log::warn!("Social link {} is not configured", link),
        }
    }

    fn enter_whiteboard(&mut self) {
        let started = self.coordinator.zoom_to(
            WHITEBOARD_POSE,
            self.config.tuning.camera_duration,
            None,
            &self.camera,
            &mut self.controls,
        );

        if started {
            self.whiteboard.set_draw_mode(true);
        }
    }

    fn toggle_control(&mut self, control: ToggleKind) {
        match control {
            ToggleKind::CupLid => self.cup_lid.toggle(),
        }
    }

    fn oink(&mut self, object: ObjectId) {
        let clips = &self.config.assets.oink_clips;
        if let Some(index) = self.pig.oink(object, self.now, clips.len(), &mut self.rng) {
            let clip = clips[index].clone();
            self.sound.play(&clip);
        }
    }

    fn mailbox_intersection(&mut self, _object: ObjectId, descriptor: &NodeDescriptor) -> bool {
        let outcome = self.mailbox.handle_intersection(descriptor);
        if outcome == MailboxOutcome::ContactRequested {
            self.open_modal(ModalKind::Contact);
        }
        outcome.is_handled()
    }

    fn is_spin_target(&self, object: ObjectId) -> bool {
        self.registry.is_spin_target(object)
    }

    fn spin(&mut self, object: ObjectId) {
        if let SpinOutcome::Spun { special: true } = self.spins.trigger(object, self.now, &self.scene) {
            let center = self.object_position(object);
            self.trails
                .burst(center, self.config.tuning.particle_burst, &mut self.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::quad_model;
    use crate::scene_graph::{Object3D, SceneModel};
    use crate::sound::LogOutput;

    fn portfolio_with(names: &[&str]) -> (Portfolio, Vec<ObjectId>) {
        let mut portfolio = Portfolio::new(
            PortfolioConfig::default(),
            SoundBoard::new(Box::new(LogOutput)),
            None,
        );

        let ids = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let model = portfolio.scene.add_model(SceneModel::new(quad_model(name)));
                let mut object = Object3D::named(*name);
                object.model_id = Some(model);
                object.rest.translation = Vec3::new(index as f32 * 2.0, 0.0, 0.0);
                object.transform.set_translation(object.rest.translation);
                portfolio.scene.add_object(object)
            })
            .collect();

        portfolio.rebind();
        (portfolio, ids)
    }

    fn enter(portfolio: &mut Portfolio) {
        portfolio.apply_action(ShellAction::Enter);
        portfolio.tick(5.0);
    }

    fn look_at(portfolio: &mut Portfolio, target: Vec3) {
        portfolio.camera.position = target + Vec3::new(0.0, 0.0, 5.0);
        portfolio.camera.look_at(target);
        portfolio.pointer_moved(Vec2::ZERO);
        portfolio.tick(0.0);
    }

    #[test]
    fn nothing_is_clickable_behind_the_loading_screen() {
        let (mut portfolio, _) = portfolio_with(&["Chair_Spin_Raycast"]);
        look_at(&mut portfolio, Vec3::ZERO);

        assert_eq!(portfolio.click(), Route::Ignored);
    }

    #[test]
    fn enter_flies_to_default_and_unlocks_orbit() {
        let (mut portfolio, _) = portfolio_with(&[]);
        assert!(!portfolio.controls.is_enabled());

        enter(&mut portfolio);

        assert_eq!(portfolio.coordinator.current_pose(), Some(DEFAULT_POSE));
        assert!(portfolio.controls.is_enabled());
    }

    #[test]
    fn clicking_a_spin_target_spins_it() {
        let (mut portfolio, ids) = portfolio_with(&["Chair_Spin_Raycast"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);

        assert_eq!(portfolio.click(), Route::Spin);
        assert_eq!(portfolio.hover().hovered(), Some(ids[0]));
    }

    #[test]
    fn open_modal_disables_picking() {
        let (mut portfolio, _) = portfolio_with(&["Shelf_About_Raycast", "Chair_Spin_Raycast"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);

        assert_eq!(portfolio.click(), Route::Modal(ModalKind::About));
        portfolio.tick(0.0);
        look_at(&mut portfolio, Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(portfolio.click(), Route::Ignored);
    }

    #[test]
    fn whiteboard_round_trip() {
        let (mut portfolio, _) = portfolio_with(&["Whiteboard"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);

        assert_eq!(portfolio.click(), Route::Whiteboard);
        assert!(portfolio.whiteboard.is_drawing());
        portfolio.tick(5.0);
        assert_eq!(portfolio.coordinator.current_pose(), Some(WHITEBOARD_POSE));
        assert!(!portfolio.controls.is_enabled());

        portfolio.key_pressed(Key::Character("p"));
        portfolio.tick(5.0);

        assert!(!portfolio.whiteboard.is_drawing());
        assert_eq!(portfolio.coordinator.current_pose(), Some(DEFAULT_POSE));
        assert!(portfolio.controls.is_enabled());
    }

    #[test]
    fn arriving_home_keeps_orbit_off_while_page_is_interactive() {
        let (mut portfolio, _) = portfolio_with(&["Whiteboard"]);
        enter(&mut portfolio);

        portfolio.key_pressed(Key::Character("o"));
        portfolio.tick(5.0);
        portfolio.key_pressed(Key::Character("p"));
        portfolio.tick(0.1);
        portfolio.key_pressed(Key::Character("i"));
        assert!(!portfolio.controls.is_enabled());

        portfolio.tick(5.0);
        assert_eq!(portfolio.coordinator.current_pose(), Some(DEFAULT_POSE));
        assert!(!portfolio.controls.is_enabled());

        portfolio.key_pressed(Key::Character("i"));
        assert!(portfolio.controls.is_enabled());
    }

    #[test]
    fn opening_a_modal_drops_the_hover() {
        let (mut portfolio, ids) = portfolio_with(&["Shelf_About_Raycast"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);
        assert_eq!(portfolio.hover().hovered(), Some(ids[0]));
        assert_eq!(portfolio.hover().cursor(), Cursor::Pointer);

        assert_eq!(portfolio.click(), Route::Modal(ModalKind::About));

        assert_eq!(portfolio.tick(0.0), Some(Cursor::Default));
        assert_eq!(portfolio.hover().hovered(), None);
        assert!(portfolio.hover().highlight().is_empty());
        assert_eq!(portfolio.tick(0.0), None);
    }

    #[test]
    fn panel_button_toggles_the_side_panel() {
        let (mut portfolio, _) = portfolio_with(&[]);
        assert!(!portfolio.panel.is_open());

        portfolio.apply_action(ShellAction::TogglePanel);
        assert!(portfolio.panel.is_open());

        portfolio.apply_action(ShellAction::TogglePanel);
        assert!(!portfolio.panel.is_open());
    }

    #[test]
    fn mailbox_second_click_opens_contact() {
        let (mut portfolio, _) = portfolio_with(&["Mailbox_Raycast"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);

        assert_eq!(portfolio.click(), Route::Mailbox);
        portfolio.tick(2.0);
        look_at(&mut portfolio, Vec3::ZERO);
        assert_eq!(portfolio.click(), Route::Mailbox);

        assert_eq!(portfolio.modals().open_modal(), Some(ModalKind::Contact));
    }

    #[test]
    fn embedded_page_click_needs_interactive_mode() {
        let (mut portfolio, _) = portfolio_with(&["Monitor_Screen_Raycast"]);
        enter(&mut portfolio);
        look_at(&mut portfolio, Vec3::ZERO);
        assert_eq!(portfolio.click(), Route::Ignored);

        portfolio.key_pressed(Key::Character("i"));
        assert!(!portfolio.controls.is_enabled());
        assert!(portfolio.embedded_page_interactive());

        portfolio.key_pressed(Key::Character("i"));
        assert!(portfolio.controls.is_enabled());
    }

    #[test]
    fn theme_key_toggles_theme() {
        let (mut portfolio, _) = portfolio_with(&[]);
        enter(&mut portfolio);

        portfolio.key_pressed(Key::Character("T"));
        portfolio.tick(5.0);

        assert_eq!(portfolio.theme.theme(), crate::theme::Theme::Night);
        assert!((portfolio.theme.mix().get() - 1.0).abs() < 1e-5);
    }
}
