use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cube_tower::core::element::VisualRef;
use cube_tower::interaction::drag::{DragCandidate, DragOutcome, DragSession};
use cube_tower::services::notifications::LogNotifications;
use cube_tower::services::pool::{CountingPool, VisualPool};
use cube_tower::services::presenter::{OnComplete, Presenter, ViewId};
use cube_tower::zones::rules::rules_for;
use cube_tower::zones::{DropZone, ElementOrigin};
use cube_tower::{
    ElementCatalog, GameConfig, HoleModel, HoleZone, JsonFileSaveLoad, TowerZone, TrayModel,
};

#[derive(Parser, Debug)]
#[command(name = "cube_tower", about = "Headless tower stacking driver")]
struct Args {
    /// RON game configuration.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
    /// Override the save file location from the config.
    #[arg(long)]
    save_file: Option<PathBuf>,
    /// Start from an empty tower, ignoring any saved state.
    #[arg(long)]
    reset: bool,
    /// Seed for horizontal-offset sampling (entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

/// Presenter that narrates every requested effect and completes animations
/// immediately; the stand-in for a real tween/render layer.
struct LogPresenter;

impl Presenter for LogPresenter {
    fn show_view(&self, view: ViewId, sprite: &VisualRef, position: Vec3) {
        info!(target: "present", "show {view:?} ({}) at {position}", sprite.as_str());
    }

    fn hide_view(&self, view: ViewId) {
        info!(target: "present", "hide {view:?}");
    }

    fn set_view_position(&self, view: ViewId, position: Vec3) {
        info!(target: "present", "move {view:?} to {position}");
    }

    fn animate_view_to(&self, view: ViewId, to: Vec3, duration_secs: f32) {
        info!(target: "present", "tween {view:?} to {to} over {duration_secs}s");
    }

    fn play_move_animation(
        &self,
        from: Vec3,
        to: Vec3,
        sprite: &VisualRef,
        duration_secs: f32,
        on_complete: OnComplete,
    ) {
        info!(
            target: "present",
            "jump {} from {from} to {to} over {duration_secs}s",
            sprite.as_str()
        );
        on_complete();
    }

    fn play_fade_animation(
        &self,
        target: ViewId,
        fade_in: bool,
        duration_secs: f32,
        on_complete: OnComplete,
    ) {
        info!(
            target: "present",
            "fade {} {target:?} over {duration_secs}s",
            if fade_in { "in" } else { "out" }
        );
        on_complete();
    }
}

/// Pick the next tray element, walk it from the tray to `target`, and let the
/// session resolve the drop.
fn drag_from_tray(
    session: &mut DragSession,
    tray: &Rc<RefCell<TrayModel>>,
    pool: &Rc<RefCell<CountingPool>>,
    tray_origin: Vec3,
    target: Vec2,
) -> Option<DragOutcome> {
    let (id, element_type) = {
        let tray_ref = tray.borrow();
        let first = tray_ref.first()?;
        (first.id, first.element_type.clone())
    };
    let ghost = pool.borrow_mut().acquire_visual(&element_type)?;
    let origin: Rc<RefCell<dyn ElementOrigin>> = tray.clone();
    let origin_id = tray.borrow().container_id();
    let candidate = DragCandidate {
        id,
        element_type,
        view: ghost.id,
        size: ghost.size,
        origin_position: tray_origin,
        origin,
        origin_id,
        from_tower: false,
    };
    session.on_drag_start(candidate, tray_origin.truncate());
    session.on_drag_move((tray_origin.truncate() + target) * 0.5);
    let outcome = session.on_drag_end(target);
    pool.borrow_mut().release_visual(ghost.id);
    outcome
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let (cfg, cfg_err) = GameConfig::load_or_default(&args.config);
    if let Some(e) = cfg_err {
        warn!(target: "config", "using defaults: {e}");
    }
    for w in cfg.validate() {
        warn!(target: "config", "{w}");
    }

    let catalog = ElementCatalog::from_config(&cfg);
    let presenter = Rc::new(LogPresenter);
    let notifications = Rc::new(LogNotifications);
    let pool = Rc::new(RefCell::new(CountingPool::new(cfg.element_visual.size())));
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let tower = Rc::new(RefCell::new(TowerZone::new(
        cfg.tower.rect(),
        rules_for(cfg.drop_rule),
        pool.clone(),
        presenter.clone(),
        notifications.clone(),
        cfg.drag.collapse_duration,
        rng,
    )));
    let hole = Rc::new(RefCell::new(HoleZone::new(
        HoleModel::new(cfg.hole.center(), cfg.hole.ellipse_size()),
        notifications.clone(),
    )));

    let save_path = args
        .save_file
        .unwrap_or_else(|| PathBuf::from(&cfg.save_file));
    let save = JsonFileSaveLoad::new(save_path);
    if args.reset {
        info!(target: "save", "starting fresh (--reset)");
    } else if let Some(record) = save.load() {
        tower.borrow_mut().load_from_record(&record, &catalog);
    }

    let tray = Rc::new(RefCell::new(TrayModel::new()));
    tray.borrow_mut()
        .initialize_from_catalog(&catalog, cfg.bottom_cube_count);

    let mut session = DragSession::new(presenter, notifications, cfg.drag.clone());
    session.register_zone(tower.clone() as Rc<RefCell<dyn DropZone>>);
    session.register_zone(hole.clone() as Rc<RefCell<dyn DropZone>>);

    let tray_origin = Vec3::new(0.0, cfg.tower.min_y - 200.0, 0.0);
    let zone_rect = cfg.tower.rect();
    let first_drop = Vec2::new(
        (zone_rect.min.x + zone_rect.max.x) * 0.5,
        zone_rect.min.y + cfg.element_visual.height * 0.5,
    );

    // Scripted gestures: stack a few cubes, feed one to the hole, fumble one.
    for i in 0..3 {
        let target = match tower.borrow().model().top_position(0.5) {
            Some(top) => top.truncate(),
            None => first_drop,
        };
        let outcome = drag_from_tray(&mut session, &tray, &pool, tray_origin, target);
        info!(target: "driver", "gesture {i}: {outcome:?}");
    }
    let outcome = drag_from_tray(&mut session, &tray, &pool, tray_origin, cfg.hole.center());
    info!(target: "driver", "hole gesture: {outcome:?}");
    let outcome = drag_from_tray(
        &mut session,
        &tray,
        &pool,
        tray_origin,
        Vec2::new(10_000.0, 10_000.0),
    );
    info!(target: "driver", "miss gesture: {outcome:?}");

    {
        let tower_ref = tower.borrow();
        info!(
            target: "driver",
            "tower: {} element(s), height {:.1}; tray: {} left",
            tower_ref.model().element_count(),
            tower_ref.model().current_height(),
            tray.borrow().len()
        );
    }
    save.save(&tower.borrow().to_record());
}
