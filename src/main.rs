use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use faceless::engine::camera::Camera;
use faceless::engine::game_loop::{FrameTime, GameLoop};
use faceless::engine::input::{Action, InputManager, EQUIP_SLOTS};
use faceless::engine::physics::{presets, PhysicsWorld};
use faceless::game::abilities::{
    AbilityCatalog, AbilityClass, AbilityEnv, AbilityEvent, AbilityManager,
};
use faceless::game::actor::Actor;
use faceless::game::objects::{BreakableObject, WaterWall, WorldObjects};
use faceless::game::orb::OrbSet;
use faceless::game::pickup::Pickups;
use faceless::game::player::PlayerController;
use faceless::game::stats::BASE_STATS;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const PIXELS_PER_UNIT: f32 = 32.0;

/// Builds an `AbilityEnv` from disjoint sandbox fields
macro_rules! ability_env {
    ($sandbox:expr, $time:expr) => {
        AbilityEnv {
            physics: &mut $sandbox.physics,
            input: $sandbox.input.player(),
            camera: Some(&$sandbox.camera),
            objects: &mut $sandbox.objects,
            orbs: &mut $sandbox.orbs,
            time: $time,
        }
    };
}

/// A small test level with one of everything
struct Sandbox {
    physics: PhysicsWorld,
    input: InputManager,
    camera: Camera,
    objects: WorldObjects,
    orbs: OrbSet,
    pickups: Pickups,
    abilities: AbilityManager,
    controller: PlayerController,
    game_loop: GameLoop,
}

impl Sandbox {
    fn new(catalog: &AbilityCatalog) -> Self {
        let mut physics = PhysicsWorld::new();
        let mut objects = WorldObjects::new();
        let mut pickups = Pickups::new();

        // Floor and a wall at the far end
        let floor = physics.add_rigid_body(presets::ground_body(0.0, -0.5));
        physics.add_collider(presets::ground_collider(60.0, 1.0), floor);
        let wall = physics.add_rigid_body(presets::ground_body(28.0, 5.0));
        physics.add_collider(presets::ground_collider(1.0, 10.0), wall);

        // Player
        let body = physics.add_rigid_body(presets::player_body(0.0, BASE_STATS.height));
        let collider = physics.add_collider(
            presets::player_collider(BASE_STATS.width, BASE_STATS.height),
            body,
        );
        let player = Actor::new(body, collider);

        // A crate to throw around
        let prop = physics.add_rigid_body(presets::prop_body(-4.0, 0.5));
        physics.add_collider(presets::prop_collider(1.0, 1.0, 1.0), prop);

        // A crate telekinesis can smash
        let breakable = physics.add_rigid_body(presets::prop_body(-7.0, 0.5));
        let breakable_collider =
            physics.add_collider(presets::prop_collider(1.0, 1.0, 1.0), breakable);
        objects.insert(
            Box::new(BreakableObject::new("wooden crate", breakable)),
            &[breakable_collider],
            Some(breakable),
        );

        // Water wall: freeze it to climb it, burn it to melt it again
        let water = physics.add_rigid_body(presets::ground_body(12.0, 2.0));
        let water_collider = physics.add_collider(presets::ground_collider(1.0, 4.0), water);
        let water_wall = WaterWall::new(water_collider, &mut physics);
        objects.insert(Box::new(water_wall), &[water_collider], Some(water));

        // One pickup per ability, in a row
        for (i, definition) in catalog.iter().enumerate() {
            let position = Vec2::new(3.0 + i as f32 * 1.5, 1.0);
            pickups.spawn(&mut physics, position, Some(definition.clone()));
        }

        Self {
            physics,
            input: InputManager::new(),
            camera: Camera::new(
                Vec2::ZERO,
                WINDOW_WIDTH as f32,
                WINDOW_HEIGHT as f32,
                PIXELS_PER_UNIT,
            ),
            objects,
            orbs: OrbSet::new(),
            pickups,
            abilities: AbilityManager::new(BASE_STATS, Some(player)),
            controller: PlayerController::new(player),
            game_loop: GameLoop::new(),
        }
    }

    /// One rendered frame: a frame tick, then the fixed physics steps
    fn frame(&mut self) {
        if self.input.player().just_pressed(Action::Menu) {
            self.game_loop.toggle_pause();
        }
        let steps = self.game_loop.begin_frame();
        if self.game_loop.is_paused() {
            self.input.update();
            return;
        }

        let frame_time = self.game_loop.frame_time();
        self.handle_equip_input(frame_time);
        self.abilities.frame_tick(&mut ability_env!(self, frame_time));
        self.controller.update(
            &mut self.physics,
            self.input.player(),
            &self.abilities.stats().runtime,
            frame_time.dt,
        );

        for _ in 0..steps {
            self.physics_step();
        }
        self.orbs.expire(&mut self.physics, frame_time.now);

        for impact in self.orbs.drain_impacts() {
            debug!("{:?} impact at {}", impact.element, impact.position);
        }
        for event in self.abilities.drain_events() {
            log_event(&event);
        }

        if let Some(position) = self.controller.position(&self.physics) {
            self.camera.follow(position, 5.0, frame_time.dt);
        }
        self.input.update();
    }

    /// Collision events only live until the next step, so they are handled here
    fn physics_step(&mut self) {
        let time = self.game_loop.physics_time();
        self.abilities.physics_tick(&mut ability_env!(self, time));
        self.physics.step();

        let events = self.physics.get_collision_events();
        self.orbs
            .handle_collisions(&events, &mut self.physics, &mut self.objects);

        let player = self.controller.actor();
        let granted = self
            .pickups
            .collect(&events, player.collider, &mut self.physics);
        for definition in granted {
            self.abilities
                .unlock(&definition, &mut ability_env!(self, time));
        }
    }

    /// Number keys pick among unlocked active abilities, Q clears
    fn handle_equip_input(&mut self, time: FrameTime) {
        let player = self.input.player();
        if player.just_pressed(Action::Unequip) {
            self.abilities.unequip_active(&mut ability_env!(self, time));
            return;
        }

        let Some(slot) = (0..EQUIP_SLOTS).find(|slot| player.just_pressed(Action::EquipSlot(*slot)))
        else {
            return;
        };
        let index = self
            .abilities
            .unlocked()
            .iter()
            .enumerate()
            .filter(|(_, ability)| ability.class() == AbilityClass::Active)
            .nth(slot as usize)
            .map(|(index, _)| index);

        match index {
            Some(index) => self.abilities.equip(Some(index), &mut ability_env!(self, time)),
            None => debug!("Nothing in ability slot {}", slot + 1),
        }
    }
}

fn log_event(event: &AbilityEvent) {
    match event {
        AbilityEvent::Unlocked { name, class, .. } => info!("New {:?} ability: {}", class, name),
        AbilityEvent::Unequipped(kind) => debug!("{} put away", kind),
        AbilityEvent::Equipped(Some(kind)) => info!("Active ability: {}", kind),
        AbilityEvent::Equipped(None) => info!("No active ability"),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Faceless...");

    let catalog = AbilityCatalog::new(AbilityCatalog::standard().iter().cloned().collect())?;
    let mut sandbox = Sandbox::new(&catalog);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Faceless")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                sandbox
                    .camera
                    .resize(physical_size.width as f32, physical_size.height as f32);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                sandbox.input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                sandbox.input.process_mouse_button(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                sandbox.input.process_cursor_moved(position);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                sandbox.input.player_mut().reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                sandbox.frame();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
