use balloons::simulation::balloon::{Balloon, BALLOON_WIDTH};
use balloons::simulation::forces::{coulomb_force, BalloonForce, ForceSet};
use balloons::simulation::model::SimulationModel;
use balloons::simulation::params::{Parameters, FRAME_MS, MAX_BALLOON_CHARGE};
use balloons::simulation::play_area::{BalloonDirection, Column, Landmark, PlayAreaMap, Row};
use balloons::simulation::states::{BalloonId, NVec2, Rect, ShowCharges};
use balloons::simulation::sweater::Sweater;
use balloons::{ActionKind, Engine, Scenario, ScenarioConfig, ScenarioError};

use BalloonId::{Green, Yellow};

/// Default model (yellow out, green hidden, wall up)
pub fn test_model() -> SimulationModel {
    SimulationModel::default()
}

/// Drag balloon `id` onto the sweater and scrub it up and down for `strokes`
/// steps. The balloon is left grabbed.
pub fn rub(model: &mut SimulationModel, id: BalloonId, strokes: usize) {
    model.drag_balloon(id, NVec2::new(100.0, 120.0));
    model.step(FRAME_MS);
    for k in 0..strokes {
        let dy = if k % 2 == 0 { 20.0 } else { -20.0 };
        let target = model.balloon(id).position() + NVec2::new(0.0, dy);
        model.drag_balloon(id, target);
        model.step(FRAME_MS);
    }
}

/// Yellow balloon charged on the sweater, then released flush against the wall
pub fn stuck_balloon_model() -> SimulationModel {
    let mut model = test_model();
    rub(&mut model, Yellow, 30);
    let flush = model.wall().x() - BALLOON_WIDTH;
    model.drag_balloon(Yellow, NVec2::new(flush, 120.0));
    model.set_dragged(Yellow, false);
    model.step(FRAME_MS);
    model
}

fn total_charge(model: &SimulationModel) -> i32 {
    model.sweater().net_charge() + model.balloon(Yellow).charge() + model.balloon(Green).charge()
}

/// Force term with a fixed value, for exercising `ForceSet`
struct Constant(NVec2);

impl BalloonForce for Constant {
    fn force(&self, _id: BalloonId, _model: &SimulationModel) -> NVec2 {
        self.0
    }
}

/// Fixed force that overrides every other term
struct Overriding(NVec2);

impl BalloonForce for Overriding {
    fn force(&self, _id: BalloonId, _model: &SimulationModel) -> NVec2 {
        self.0
    }

    fn dominates(&self, _id: BalloonId, _model: &SimulationModel) -> bool {
        true
    }
}

// ==================================================================================
// Force law tests
// ==================================================================================

#[test]
fn coulomb_like_charges_repel() {
    let f = coulomb_force(NVec2::new(0.0, 0.0), NVec2::new(10.0, 0.0), 100.0, 2.0);
    assert!(f.x < 0.0, "like charges should push p1 away from p2: {:?}", f);
    assert!((f.norm() - 1.0).abs() < 1e-12);
}

#[test]
fn coulomb_unlike_charges_attract() {
    let f = coulomb_force(NVec2::new(0.0, 0.0), NVec2::new(0.0, 10.0), -100.0, 2.0);
    assert!(f.y > 0.0, "unlike charges should pull p1 toward p2: {:?}", f);
}

#[test]
fn coulomb_inverse_square_law() {
    let f_r = coulomb_force(NVec2::zeros(), NVec2::new(10.0, 0.0), 1.0, 2.0);
    let f_2r = coulomb_force(NVec2::zeros(), NVec2::new(20.0, 0.0), 1.0, 2.0);

    let ratio = f_r.norm() / f_2r.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn coulomb_coincident_points_give_zero() {
    let p = NVec2::new(5.0, 5.0);
    assert_eq!(coulomb_force(p, p, 1.0e6, 2.35), NVec2::zeros());
}

#[test]
fn force_set_caps_net_force() {
    let model = test_model().with_forces(
        ForceSet::new()
            .with(Constant(NVec2::new(30.0, 0.0)))
            .with(Constant(NVec2::new(0.0, 40.0))),
    );

    let f = model.net_force(Yellow);
    let max = model.parameters().max_force;
    assert!((f.norm() - max).abs() < 1e-12, "force not capped: {:?}", f);
    // direction is kept
    assert!((f.x / f.y - 0.75).abs() < 1e-12);
}

#[test]
fn force_set_sums_small_terms() {
    let model = test_model().with_forces(
        ForceSet::new()
            .with(Constant(NVec2::new(0.25, 0.0)))
            .with(Constant(NVec2::new(0.0, -0.5))),
    );

    let f = model.net_force(Yellow);
    assert!((f - NVec2::new(0.25, -0.5)).norm() < 1e-12);
}

#[test]
fn force_set_dominating_term_replaces_sum() {
    let model = test_model().with_forces(
        ForceSet::new()
            .with(Constant(NVec2::new(1.0, 1.0)))
            .with(Overriding(NVec2::new(-0.1, 0.0))),
    );

    let f = model.net_force(Yellow);
    assert!((f - NVec2::new(-0.1, 0.0)).norm() < 1e-12);
}

#[test]
fn uncharged_balloon_feels_no_force() {
    let model = test_model();
    assert_eq!(model.net_force(Yellow), NVec2::zeros());
}

#[test]
fn sweater_force_is_mirror_symmetric() {
    let mut model = test_model();
    rub(&mut model, Yellow, 10);
    model.set_dragged(Yellow, false);
    assert!(model.balloon(Yellow).charge() < 0);

    // balloon centers at x = 70 and x = 270, mirrored about the sweater center x = 170
    model.set_balloon_position(Yellow, NVec2::new(3.0, 150.0));
    let left = model.sweater_force(Yellow);
    model.set_balloon_position(Yellow, NVec2::new(203.0, 150.0));
    let right = model.sweater_force(Yellow);

    assert!(left.x > 0.0 && right.x < 0.0, "both should point at the sweater center");
    assert!((left.x + right.x).abs() < 1e-9, "left {:?} right {:?}", left, right);
    assert!((left.y - right.y).abs() < 1e-9);
}

#[test]
fn mirrored_balloons_feel_mirrored_forces() {
    let mut model = test_model();
    model.set_balloon_visible(Green, true);

    // disjoint pickup bands, four charges each
    model.set_balloon_position(Yellow, NVec2::new(150.0, 0.0));
    model.set_balloon_position(Green, NVec2::new(150.0, 282.0));
    for _ in 0..4 {
        assert!(model.rub_sweater(Yellow));
        assert!(model.rub_sweater(Green));
    }
    assert_eq!(model.balloon(Yellow).charge(), model.balloon(Green).charge());

    // centers at x = 70 and x = 270 around the sweater center x = 170
    model.set_balloon_position(Yellow, NVec2::new(3.0, 150.0));
    model.set_balloon_position(Green, NVec2::new(203.0, 150.0));

    let (ys, gs) = (model.sweater_force(Yellow), model.sweater_force(Green));
    assert!(ys.x > 0.0 && gs.x < 0.0);
    assert!((ys.x + gs.x).abs() < 1e-9, "yellow {:?} green {:?}", ys, gs);
    assert!((ys.y - gs.y).abs() < 1e-9);

    let (yn, gn) = (model.net_force(Yellow), model.net_force(Green));
    assert!((yn.x + gn.x).abs() < 1e-9, "yellow {:?} green {:?}", yn, gn);
    assert!((yn.y - gn.y).abs() < 1e-9);
}

#[test]
fn charged_balloons_repel_each_other() {
    let mut model = test_model();
    model.set_balloon_visible(Green, true);
    rub(&mut model, Yellow, 6);
    model.set_dragged(Yellow, false);
    rub(&mut model, Green, 6);
    model.set_dragged(Green, false);

    model.set_balloon_position(Yellow, NVec2::new(400.0, 40.0));
    model.set_balloon_position(Green, NVec2::new(400.0, 240.0));

    let sweater_only = model.sweater_force(Yellow);
    let net = model.net_force(Yellow);
    // green sits right below, so repulsion pushes yellow up relative to the sweater pull
    assert!(net.y < sweater_only.y, "net {:?} sweater {:?}", net, sweater_only);
}

// ==================================================================================
// Sweater charge transfer tests
// ==================================================================================

#[test]
fn rubbing_transfers_one_charge_per_call() {
    // three minus charges inside the activation rect of a balloon at (100, 100), one outside
    let plus = vec![
        NVec2::new(100.0, 150.0),
        NVec2::new(110.0, 200.0),
        NVec2::new(120.0, 250.0),
        NVec2::new(300.0, 300.0),
    ];
    let mut sweater = Sweater::with_charge_positions(Rect::new(0.0, 0.0, 340.0, 500.0), plus);
    let mut balloon = Balloon::new(Yellow, NVec2::new(100.0, 100.0), true);

    assert!(sweater.find_intersection(&mut balloon));
    assert_eq!(sweater.moved_count(), 1);
    assert_eq!(sweater.net_charge(), 1);
    assert_eq!(balloon.charge(), -1);

    assert!(sweater.find_intersection(&mut balloon));
    assert!(sweater.find_intersection(&mut balloon));
    assert!(!sweater.find_intersection(&mut balloon), "the fourth charge is out of reach");
    assert_eq!(balloon.charge(), -3);
    assert!(!sweater.minus_charges()[3].moved());
}

#[test]
fn rubbing_default_sweater_with_three_charges_in_reach() {
    let mut model = test_model();
    // only the middle column (x = 173) falls inside the pickup band; four rows are in reach
    model.set_balloon_position(Yellow, NVec2::new(150.0, 0.0));
    let in_reach = |m: &SimulationModel| {
        let area = m.balloon(Yellow).activation_rect();
        m.sweater()
            .minus_charges()
            .iter()
            .filter(|c| !c.moved() && area.contains_strict(&c.position()))
            .count()
    };

    assert!(model.rub_sweater(Yellow));
    assert_eq!(in_reach(&model), 3);

    assert!(model.rub_sweater(Yellow));
    assert_eq!(in_reach(&model), 2);
    assert_eq!(model.balloon(Yellow).charge(), -2);
    assert_eq!(model.sweater().net_charge(), 2);
    assert_eq!(total_charge(&model), 0);
}

#[test]
fn model_with_custom_sweater_rubs_from_it() {
    let plus = vec![NVec2::new(100.0, 150.0), NVec2::new(110.0, 200.0)];
    let sweater = Sweater::with_charge_positions(Rect::new(0.0, 0.0, 340.0, 500.0), plus);
    let mut model = test_model().with_sweater(sweater);
    model.set_balloon_position(Yellow, NVec2::new(100.0, 100.0));

    assert!(model.rub_sweater(Yellow));
    assert!(model.rub_sweater(Yellow));
    assert!(!model.rub_sweater(Yellow), "custom sweater only has two charges");
    assert_eq!(model.sweater().minus_charges().len(), 2);
    assert_eq!(model.balloon(Yellow).charge(), -2);
}

#[test]
fn balloon_charge_saturates_at_max() {
    let plus: Vec<NVec2> = (0..60).map(|i| NVec2::new(100.0, 95.0 + 3.0 * i as f64)).collect();
    let mut sweater = Sweater::with_charge_positions(Rect::new(0.0, 0.0, 340.0, 500.0), plus);
    let mut balloon = Balloon::new(Yellow, NVec2::new(100.0, 100.0), true);

    let transferred = (0..60).filter(|_| sweater.find_intersection(&mut balloon)).count();

    assert_eq!(transferred, MAX_BALLOON_CHARGE as usize);
    assert_eq!(balloon.charge(), -MAX_BALLOON_CHARGE);
    assert_eq!(sweater.net_charge(), MAX_BALLOON_CHARGE);
}

#[test]
fn default_sweater_layout() {
    let sweater = Sweater::default();
    assert_eq!(sweater.plus_charges().len(), 57);
    assert_eq!(sweater.minus_charges().len(), 57);
    assert!((sweater.center() - NVec2::new(170.0, 250.0)).norm() < 1e-12);
    for c in sweater.minus_charges() {
        assert!(sweater.bounds().contains(&c.position()));
    }
}

#[test]
fn rubbing_charges_balloon_and_conserves_charge() {
    let mut model = test_model();
    rub(&mut model, Yellow, 30);

    let charge = model.balloon(Yellow).charge();
    assert!(charge < -5, "expected a well charged balloon, got {}", charge);
    assert!(charge >= -MAX_BALLOON_CHARGE);
    assert_eq!(total_charge(&model), 0);
    assert_eq!(model.sweater().moved_count() as i32, -charge);
}

#[test]
fn dragged_balloon_away_from_sweater_picks_up_nothing() {
    let mut model = test_model();
    model.drag_balloon(Yellow, NVec2::new(450.0, 150.0));
    model.step(FRAME_MS);
    model.drag_balloon(Yellow, NVec2::new(460.0, 170.0));
    model.step(FRAME_MS);
    assert_eq!(model.balloon(Yellow).charge(), 0);
}

// ==================================================================================
// Balloon motion tests
// ==================================================================================

#[test]
fn dragged_balloon_is_unchanged_by_step() {
    let mut model = test_model();
    rub(&mut model, Yellow, 8);
    let before = model.balloon(Yellow).clone();

    for _ in 0..20 {
        model.step(FRAME_MS);
    }

    let after = model.balloon(Yellow);
    assert_eq!(after.position(), before.position());
    assert_eq!(after.velocity(), NVec2::zeros());
    assert_eq!(after.charge(), before.charge(), "a still balloon does not rub");
}

#[test]
fn released_balloon_drifts_toward_sweater() {
    let mut model = test_model();
    rub(&mut model, Yellow, 20);
    model.drag_balloon(Yellow, NVec2::new(400.0, 140.0));
    model.set_dragged(Yellow, false);

    let x0 = model.balloon(Yellow).position().x;
    for _ in 0..30 {
        model.step(FRAME_MS);
    }
    assert!(model.balloon(Yellow).position().x < x0);
}

#[test]
fn released_balloon_comes_to_rest_on_sweater() {
    let mut model = test_model();
    rub(&mut model, Yellow, 30);
    model.drag_balloon(Yellow, NVec2::new(400.0, 140.0));
    model.set_dragged(Yellow, false);

    for _ in 0..200 {
        model.step(FRAME_MS);
    }
    let balloon = model.balloon(Yellow);
    assert_eq!(balloon.velocity(), NVec2::zeros());
    assert!(model.sweater().bounds().contains(&balloon.center()));

    let resting = balloon.position();
    for _ in 0..100 {
        model.step(FRAME_MS);
    }
    assert_eq!(model.balloon(Yellow).position(), resting, "no swinging through the sweater");
}

#[test]
fn hidden_balloon_does_not_move() {
    let mut model = test_model();
    rub(&mut model, Yellow, 20);
    model.drag_balloon(Yellow, NVec2::new(400.0, 140.0));
    model.set_balloon_visible(Yellow, false);
    assert!(!model.balloon(Yellow).is_dragged());

    let before = model.balloon(Yellow).position();
    for _ in 0..30 {
        model.step(FRAME_MS);
    }
    assert_eq!(model.balloon(Yellow).position(), before);
    assert_eq!(total_charge(&model), 0, "hiding a balloon keeps its charge");
}

#[test]
fn drag_is_clamped_to_wall() {
    let mut model = SimulationModel::new(800.0, 600.0, 80.0);
    model.drag_balloon(Yellow, NVec2::new(500.0, 100.0));
    assert_eq!(model.balloon(Yellow).position().x, 500.0);

    let out = model.drag_balloon(Yellow, NVec2::new(760.0, 100.0));
    assert!(out);
    assert!((model.balloon(Yellow).position().x - (800.0 - 80.0 - BALLOON_WIDTH)).abs() < 1e-12);
}

#[test]
fn drag_uses_full_width_without_wall() {
    let mut model = SimulationModel::new(800.0, 600.0, 80.0);
    model.set_wall_visible(false);

    model.drag_balloon(Yellow, NVec2::new(760.0, -40.0));
    let p = model.balloon(Yellow).position();
    assert!((p.x - (800.0 - BALLOON_WIDTH)).abs() < 1e-12);
    assert_eq!(p.y, 0.0);
}

#[test]
fn drag_records_direction() {
    let mut model = test_model();
    model.drag_balloon(Yellow, NVec2::new(300.0, 100.0));
    assert_eq!(model.balloon(Yellow).direction(), Some(BalloonDirection::Left));

    model.drag_balloon(Yellow, NVec2::new(320.0, 80.0));
    assert_eq!(model.balloon(Yellow).direction(), Some(BalloonDirection::UpRight));
}

#[test]
fn large_time_step_is_capped() {
    let params = Parameters::default();
    assert!((params.frames(FRAME_MS) - 1.0).abs() < 1e-12);
    assert!((params.frames(10_000.0) - params.max_dt_ms / params.frame_ms).abs() < 1e-12);
    assert_eq!(params.frames(-5.0), 0.0);
}

// ==================================================================================
// Wall tests
// ==================================================================================

#[test]
fn charged_balloon_sticks_to_wall() {
    let model = stuck_balloon_model();
    let balloon = model.balloon(Yellow);

    assert!(balloon.is_stopped());
    assert_eq!(balloon.velocity(), NVec2::zeros());
    assert!(model.touching_wall(Yellow));
    assert!(model.any_charged_balloon_touching_wall());
    assert!(model.inducing_charge(Yellow));
}

#[test]
fn uncharged_balloon_does_not_stick_to_wall() {
    let mut model = test_model();
    let flush = model.wall().x() - BALLOON_WIDTH;
    model.drag_balloon(Yellow, NVec2::new(flush, 120.0));
    model.set_dragged(Yellow, false);
    model.step(FRAME_MS);

    assert!(!model.balloon(Yellow).is_stopped());
    assert!(model.touching_wall(Yellow));
    assert!(!model.any_charged_balloon_touching_wall());
    assert!(!model.inducing_charge(Yellow));
}

#[test]
fn wall_toggle_frees_stuck_balloon() {
    let mut model = stuck_balloon_model();

    model.set_wall_visible(false);
    model.set_wall_visible(true);
    assert!(!model.balloon(Yellow).is_stopped());

    // the next step integrates again and the balloon settles back on the wall
    model.step(FRAME_MS);
    assert!(model.balloon(Yellow).is_stopped());
    assert_eq!(model.balloon(Yellow).velocity(), NVec2::zeros());
}

#[test]
fn removing_wall_lets_balloon_drift() {
    let mut model = stuck_balloon_model();
    let x0 = model.balloon(Yellow).position().x;

    model.set_wall_visible(false);
    model.step(FRAME_MS);

    assert!(!model.balloon(Yellow).is_stopped());
    assert!(model.balloon(Yellow).position().x < x0, "should head back toward the sweater");
}

#[test]
fn wall_returning_pushes_balloon_out_of_gap() {
    let mut model = test_model();
    model.set_wall_visible(false);
    model.set_balloon_position(Yellow, NVec2::new(620.0, 100.0));

    model.set_wall_visible(true);
    let x = model.balloon(Yellow).position().x;
    assert!((x - (model.wall().x() - BALLOON_WIDTH)).abs() < 1e-12);
}

#[test]
fn wall_charges_pushed_away_from_charged_balloon() {
    let mut model = stuck_balloon_model();
    model.step(FRAME_MS);

    let charges = model.wall().minus_charges();
    assert!(charges.iter().all(|c| c.position().x >= c.default_position().x));
    assert!(charges.iter().any(|c| c.position().x - c.default_position().x > 0.1));

    model.set_wall_visible(false);
    model.step(FRAME_MS);
    assert!(model
        .wall()
        .minus_charges()
        .iter()
        .all(|c| c.position() == c.default_position()));
}

#[test]
fn reset_keeps_starting_wall_visibility() {
    let mut model = test_model().with_wall_visible(false);
    model.set_wall_visible(true);
    model.reset();
    assert!(!model.wall().is_visible());
    assert_eq!(model.bounds().max.x, 768.0);

    let mut model = test_model();
    model.set_wall_visible(false);
    model.reset();
    assert!(model.wall().is_visible());
}

#[test]
fn default_wall_layout() {
    let model = test_model();
    let wall = model.wall();
    assert_eq!(wall.x(), 688.0);
    assert_eq!(wall.plus_charges().len(), 54);
    assert_eq!(wall.minus_charges().len(), 54);
    assert!(wall.is_visible());
}

// ==================================================================================
// Model-level tests
// ==================================================================================

#[test]
fn default_layout() {
    let model = test_model();
    let yellow = model.balloon(Yellow);
    let green = model.balloon(Green);

    assert_eq!(yellow.position(), NVec2::new(440.0, 100.0));
    assert!(yellow.is_visible());
    assert_eq!(green.position(), NVec2::new(380.0, 130.0));
    assert!(!green.is_visible());
    assert_eq!(model.show_charges(), ShowCharges::All);
    assert_eq!(model.bounds(), Rect::new(0.0, 0.0, 688.0, 504.0));
}

#[test]
fn reset_is_idempotent_and_restores_defaults() {
    let mut model = test_model();
    model.set_balloon_visible(Green, true);
    rub(&mut model, Yellow, 12);
    model.set_dragged(Yellow, false);
    model.set_show_charges(ShowCharges::Diff);
    model.set_wall_visible(false);
    for _ in 0..10 {
        model.step(FRAME_MS);
    }

    model.reset();
    let once = model.snapshot();
    model.reset();
    let twice = model.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once, test_model().snapshot());
}

#[test]
fn charge_is_conserved_over_a_session() {
    let mut model = test_model();
    model.set_balloon_visible(Green, true);

    for round in 0..3 {
        let id = if round % 2 == 0 { Yellow } else { Green };
        rub(&mut model, id, 15);
        model.set_dragged(id, false);
        for _ in 0..50 {
            model.step(FRAME_MS);
            assert_eq!(total_charge(&model), 0);
            for b in model.balloons() {
                assert!((-MAX_BALLOON_CHARGE..=0).contains(&b.charge()));
            }
        }
    }
}

#[test]
fn descriptive_queries() {
    let mut model = test_model();
    assert!(!model.on_sweater(Yellow));
    assert!(!model.balloons_adjacent(), "green is hidden");

    model.set_balloon_visible(Green, true);
    assert!(model.balloons_adjacent());

    model.set_balloon_position(Yellow, NVec2::new(100.0, 100.0));
    assert!(model.on_sweater(Yellow));
    assert!(!model.balloons_adjacent());
}

#[test]
fn show_charges_modes() {
    assert!(ShowCharges::All.shows_neutral_pairs());
    assert!(ShowCharges::All.shows_excess_charge());
    assert!(!ShowCharges::Diff.shows_neutral_pairs());
    assert!(ShowCharges::Diff.shows_excess_charge());
    assert!(!ShowCharges::None.shows_excess_charge());
}

#[test]
fn excess_charges_stay_inside_balloon() {
    let mut model = test_model();
    rub(&mut model, Yellow, 30);
    let balloon = model.balloon(Yellow);

    let slots: Vec<NVec2> = balloon.excess_charge_positions().collect();
    assert_eq!(slots.len() as i32, -balloon.charge());
    for p in slots {
        assert!(balloon.bounds().contains(&p), "{:?} outside the balloon", p);
    }
    assert_eq!(balloon.neutral_pairs().count(), 8);
}

// ==================================================================================
// Play area tests
// ==================================================================================

#[test]
fn play_area_regions() {
    let mut model = test_model();

    // default yellow center is (507, 211)
    let region = model.balloon_region(Yellow);
    assert_eq!(region.column, Column::RightPlayArea);
    assert_eq!(region.row, Row::Center);
    assert_eq!(model.balloon_landmark(Yellow), None);

    let flush = model.wall().x() - BALLOON_WIDTH;
    model.set_balloon_position(Yellow, NVec2::new(flush, 0.0));
    assert_eq!(model.balloon_region(Yellow).column, Column::Wall);
    assert_eq!(model.balloon_region(Yellow).row, Row::Upper);
    assert_eq!(model.balloon_landmark(Yellow), Some(Landmark::AtWall));

    model.set_balloon_position(Yellow, NVec2::new(0.0, 280.0));
    assert_eq!(model.balloon_region(Yellow).column, Column::LeftArm);
    assert_eq!(model.balloon_region(Yellow).row, Row::Lower);
    assert_eq!(model.balloon_landmark(Yellow), Some(Landmark::LeftEdge));
}

#[test]
fn play_area_right_edge_without_wall() {
    let map = PlayAreaMap::default();
    let right_edge = 768.0 - BALLOON_WIDTH / 2.0;

    assert_eq!(map.landmark(right_edge, false), Some(Landmark::RightEdge));
    assert_eq!(map.landmark(right_edge - 10.0, false), Some(Landmark::VeryCloseToRightEdge));
    assert_eq!(map.landmark(right_edge - 40.0, false), Some(Landmark::NearRightEdge));
    assert_eq!(map.column(right_edge), Column::RightEdge);
}

#[test]
fn movement_directions() {
    let d = PlayAreaMap::direction;
    assert_eq!(d(NVec2::new(1.0, 0.0)), Some(BalloonDirection::Right));
    assert_eq!(d(NVec2::new(-1.0, 0.0)), Some(BalloonDirection::Left));
    assert_eq!(d(NVec2::new(0.0, -1.0)), Some(BalloonDirection::Up));
    assert_eq!(d(NVec2::new(0.0, 1.0)), Some(BalloonDirection::Down));
    assert_eq!(d(NVec2::new(1.0, 1.0)), Some(BalloonDirection::DownRight));
    assert_eq!(d(NVec2::new(-1.0, -1.0)), Some(BalloonDirection::UpLeft));
    assert_eq!(d(NVec2::zeros()), None);
}

// ==================================================================================
// Configuration and scenario tests
// ==================================================================================

const STICK_SCENARIO: &str = r#"
engine:
  dt_ms: 16.667
  steps: 400
  log_every: 0

actions:
  - { step: 0,  action: drag_to, balloon: yellow, position: [100.0, 120.0] }
  - { step: 1,  action: rub, balloon: yellow, strokes: 30 }
  - { step: 31, action: drag_to, balloon: yellow, position: [520.0, 120.0] }
  - { step: 32, action: release, balloon: yellow }
"#;

#[test]
fn empty_config_uses_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
    assert_eq!(cfg, ScenarioConfig::default());
    assert!(cfg.validate().is_ok());
    assert!(cfg.wall_visible);
    assert_eq!(cfg.play_area.width, 768.0);
}

#[test]
fn config_parses_actions_and_overrides() {
    let yaml = r#"
parameters:
  max_force: 1.5
show_charges: diff
balloons:
  green: { visible: true }
actions:
  - { step: 3, action: rub, balloon: green }
  - { step: 4, action: set_show_charges, show_charges: none }
  - { step: 5, action: reset }
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.parameters.to_parameters().max_force, 1.5);
    assert_eq!(cfg.parameters.to_parameters().force_constant, 10000.0);
    assert_eq!(cfg.show_charges, ShowCharges::Diff);
    assert!(cfg.balloons.visible(Green));
    assert_eq!(cfg.balloons.position(Green), NVec2::new(380.0, 130.0));

    assert_eq!(cfg.actions[0].action, ActionKind::Rub { balloon: Green, strokes: 1 });
    assert_eq!(cfg.actions[1].action, ActionKind::SetShowCharges { show_charges: ShowCharges::None });
    assert_eq!(cfg.actions[2].action, ActionKind::Reset);
}

#[test]
fn config_rejects_bad_yaml() {
    let err = ScenarioConfig::from_yaml_str("engine: [1, 2").unwrap_err();
    assert!(matches!(err, ScenarioError::Yaml(_)));
}

#[test]
fn config_validation_errors() {
    let mut cfg = ScenarioConfig::default();
    cfg.play_area.wall_gap_width = 700.0;
    assert!(matches!(cfg.validate(), Err(ScenarioError::WallGapTooWide { .. })));

    let mut cfg = ScenarioConfig::default();
    cfg.play_area.height = 0.0;
    assert!(matches!(cfg.validate(), Err(ScenarioError::InvalidDimensions { .. })));

    let mut cfg = ScenarioConfig::default();
    cfg.engine.dt_ms = 0.0;
    assert!(matches!(cfg.validate(), Err(ScenarioError::NonPositiveTimeStep(_))));

    let mut cfg = ScenarioConfig::default();
    cfg.balloons.yellow.position = Some([600.0, 100.0]);
    assert!(matches!(cfg.validate(), Err(ScenarioError::BalloonOutOfBounds { .. })));
    cfg.wall_visible = false;
    assert!(cfg.validate().is_ok(), "fits once the wall is gone");

    let bad_parameters = [
        ("frame_ms", "frame_ms: 0.0"),
        ("max_dt_ms", "max_dt_ms: -1.0"),
        ("max_force", "max_force: -0.5"),
        ("wall_attraction_divisor", "wall_attraction_divisor: 0.0"),
        ("wall_attraction_falloff", "wall_attraction_falloff: 0.0"),
    ];
    for (expected, yaml) in bad_parameters {
        let cfg = ScenarioConfig::from_yaml_str(&format!("parameters: {{ {yaml} }}")).unwrap();
        match cfg.validate() {
            Err(ScenarioError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("{yaml}: expected InvalidParameter, got {:?}", other),
        }
    }

    let mut cfg = ScenarioConfig::from_yaml_str(STICK_SCENARIO).unwrap();
    cfg.engine.steps = 20;
    assert!(matches!(
        cfg.validate(),
        Err(ScenarioError::ActionBeyondRun { step: 30, steps: 20 })
    ));
}

#[test]
fn missing_scenario_file_is_io_error() {
    let err = ScenarioConfig::from_yaml_file("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
}

#[test]
fn scenario_expands_rub_into_strokes() {
    let cfg = ScenarioConfig::from_yaml_str(STICK_SCENARIO).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.actions.len(), 1 + 30 + 2);
    assert!(scenario.actions.windows(2).all(|w| w[0].step <= w[1].step));
    assert_eq!(scenario.engine.steps, 400);
}

#[test]
fn scenario_rubbed_balloon_sticks_to_wall() {
    let cfg = ScenarioConfig::from_yaml_str(STICK_SCENARIO).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();

    let summary = scenario.run();

    assert!(summary.charges[0] < -5);
    assert_eq!(summary.sweater_charge + summary.charges[0] + summary.charges[1], 0);
    assert!(summary.stuck_to_wall[0]);
    assert!((summary.positions[0].x - (688.0 - BALLOON_WIDTH)).abs() < 1e-9);
}

#[test]
fn scenario_with_zero_frame_length_is_rejected() {
    let yaml = format!("{STICK_SCENARIO}\nparameters:\n  frame_ms: 0.0\n");
    let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ScenarioError::InvalidParameter { name: "frame_ms", .. })
    ));
}

#[test]
fn scenario_reset_keeps_wall_down() {
    let yaml = r#"
wall_visible: false
engine: { steps: 20, log_every: 0 }
actions:
  - { step: 2,  action: set_wall_visible, visible: true }
  - { step: 10, action: reset }
"#;
    let mut scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    scenario.run();
    assert!(!scenario.model.wall().is_visible());
}

#[test]
fn scenario_respects_initial_wall_and_display() {
    let yaml = r#"
wall_visible: false
show_charges: none
engine: { steps: 10 }
"#;
    let scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert!(!scenario.model.wall().is_visible());
    assert_eq!(scenario.model.show_charges(), ShowCharges::None);
    assert_eq!(scenario.model.bounds().max.x, 768.0);
}

#[test]
fn engine_log_period() {
    let engine = Engine { dt_ms: FRAME_MS, steps: 10, log_every: 5 };
    let logged: Vec<usize> = (0..10).filter(|&s| engine.should_log(s)).collect();
    assert_eq!(logged, vec![4, 9]);

    assert!((engine.duration_ms() - 10.0 * FRAME_MS).abs() < 1e-9);

    let quiet = Engine { log_every: 0, ..engine };
    assert!((0..10).all(|s| !quiet.should_log(s)));
}
