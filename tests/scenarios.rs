use deskcat::cat::state::{BehaviorState, StateKind};
use deskcat::cat::Cat;
use deskcat::input::{InputQueue, TickInput};
use deskcat::render::ascii::AsciiCanvas;
use deskcat::render::FrameSink;
use deskcat::toy::Toy;
use deskcat::{SimConfig, Simulation, Theme};
use glam::Vec2;
use proptest::prelude::*;

fn sim_400(seed: u64) -> Simulation {
    Simulation::with_seed(SimConfig::default(), 400.0, seed)
}

#[test]
fn idle_cat_walks_to_nearby_pointer() {
    let mut sim = sim_400(1);
    assert_eq!(sim.viewport().height, 200.0);
    assert_eq!(sim.cat().pos(), Vec2::new(200.0, 150.0));
    assert_eq!(sim.cat().kind(), StateKind::Idle);

    let mut input = InputQueue::new();
    input.pointer_moved(Vec2::new(210.0, 150.0));
    sim.tick(input.drain());

    assert_eq!(sim.cat().kind(), StateKind::Walking);
    assert_eq!(sim.cat().target(), Some(Vec2::new(210.0, 150.0)));
}

#[test]
fn walking_cat_hunts_then_gives_up() {
    let mut sim = sim_400(2);
    sim.cat_mut().set_state(BehaviorState::Walking { target: Vec2::new(380.0, 150.0) });
    sim.set_pointer(Some(Vec2::new(230.0, 140.0)));
    sim.step();
    assert_eq!(sim.cat().kind(), StateKind::Hunting);

    sim.set_pointer(Some(Vec2::new(399.0, 10.0)));
    sim.step();
    assert_eq!(sim.cat().kind(), StateKind::Idle);
}

#[test]
fn click_on_empty_room_spawns_one_toy() {
    let mut sim = sim_400(3);
    assert!(sim.toys().is_empty());
    sim.click(Vec2::new(50.0, 50.0));
    assert_eq!(sim.toys().len(), 1);
    let toy = sim.toys().iter().next().unwrap();
    assert_eq!(toy.pos, Vec2::new(50.0, 50.0));
    assert_eq!(toy.life, 300);
}

#[test]
fn resting_toy_falls_and_bounces_off_floor() {
    let mut sim = sim_400(4);
    sim.add_toy(Toy::new(Vec2::new(100.0, 20.0), Vec2::ZERO, '*', 1000));
    let floor = sim.viewport().height - sim.config().toy_floor_offset;

    let mut landed = false;
    for _ in 0..200 {
        sim.step();
        let toy = sim.toys().iter().next().unwrap();
        if toy.pos.y == floor {
            assert!(toy.vel.y < 0.0, "velocity should point up after the bounce");
            landed = true;
            break;
        }
        assert!(toy.vel.y > 0.0);
    }
    assert!(landed, "toy never reached the floor");
}

#[test]
fn bounces_lose_energy() {
    let mut sim = sim_400(5);
    sim.add_toy(Toy::new(Vec2::new(100.0, 20.0), Vec2::ZERO, 'o', 5000));
    let floor = sim.viewport().height - sim.config().toy_floor_offset;

    let mut rebounds = Vec::new();
    let mut prev_vy = 0.0f32;
    for _ in 0..2000 {
        sim.step();
        let toy = sim.toys().iter().next().unwrap();
        if toy.pos.y == floor && prev_vy > 0.0 {
            rebounds.push(-toy.vel.y);
        }
        prev_vy = toy.vel.y;
        if rebounds.len() == 3 {
            break;
        }
    }
    assert_eq!(rebounds.len(), 3);
    assert!(rebounds[0] > rebounds[1] && rebounds[1] > rebounds[2]);
}

#[test]
fn frame_renders_to_ascii() {
    let mut sim = sim_400(6);
    // Top-left corner, clear of the scenery.
    *sim.cat_mut() = Cat::at(Vec2::new(20.0, 20.0));
    sim.click(Vec2::new(50.0, 50.0));
    let frame = sim.frame(Theme::Light);
    let mut canvas = AsciiCanvas::for_viewport(400.0, 200.0);
    canvas.present(&frame);
    let text = canvas.to_plain();
    assert!(text.contains("( o.o )"));
    assert!(text.contains("_---_"));
    assert!(text.contains("|_________|"));
    assert!(text.contains('_'));
    assert_eq!(text.lines().count(), 17);
}

#[test]
fn cat_eventually_explores_on_its_own() {
    let mut sim = sim_400(7);
    let mut seen_walking = false;
    for _ in 0..2000 {
        sim.step();
        if sim.cat().kind() == StateKind::Walking {
            seen_walking = true;
            break;
        }
    }
    assert!(seen_walking);
}

fn pointer_strategy() -> impl Strategy<Value = Option<(f32, f32)>> {
    prop::option::of((-100.0f32..600.0, -100.0f32..400.0))
}

proptest! {
    #[test]
    fn cat_always_stays_in_bounds(
        seed in any::<u64>(),
        width in 50.0f32..1200.0,
        pointers in prop::collection::vec(pointer_strategy(), 1..300),
    ) {
        let mut sim = Simulation::with_seed(SimConfig::default(), width, seed);
        let bounds = sim.viewport().cat_bounds(sim.config());
        for p in pointers {
            sim.tick(TickInput {
                pointer: p.map(|(x, y)| Vec2::new(x, y)),
                ..TickInput::default()
            });
            prop_assert!(bounds.contains(sim.cat().pos()), "cat escaped to {:?}", sim.cat().pos());
        }
    }

    #[test]
    fn toys_live_exactly_their_lifetime(
        seed in any::<u64>(),
        life in 1u32..400,
        x in 1.0f32..399.0,
        y in 1.0f32..199.0,
    ) {
        let config = SimConfig { toy_lifetime: life, ..SimConfig::default() };
        let mut sim = Simulation::with_seed(config, 400.0, seed);
        prop_assert!(sim.click(Vec2::new(x, y)));
        for _ in 0..life - 1 {
            sim.step();
            prop_assert_eq!(sim.toys().len(), 1);
        }
        sim.step();
        prop_assert!(sim.toys().is_empty());
    }

    #[test]
    fn wall_hits_keep_horizontal_speed(vx in 0.1f32..5.0, x in 395.0f32..399.9) {
        let mut sim = sim_400(8);
        sim.add_toy(Toy::new(Vec2::new(x, 50.0), Vec2::new(vx, 0.0), '+', 100));
        // Step until the toy crosses the right edge.
        for _ in 0..100 {
            sim.step();
            let toy = sim.toys().iter().next().unwrap();
            if toy.vel.x < 0.0 {
                prop_assert!((toy.vel.x + vx).abs() < 1e-5);
                return Ok(());
            }
        }
        prop_assert!(false, "toy never reached the wall");
    }
}
