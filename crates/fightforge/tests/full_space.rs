//! Searches over the full 11^8 grid.

use fightforge::{
    run_search, BuildScorer, FightModel, Modifiers, OptimizerConfig, Scenario, SearchRequest,
    Skill, SkillLevels,
};

#[test]
fn test_zero_budget_yields_only_the_level_zero_build() {
    let request = SearchRequest::new(0);
    let outcome = run_search(&request, &OptimizerConfig::default(), None).unwrap();

    assert_eq!(outcome.processed, 214_358_881);
    assert_eq!(outcome.retained, 1);
    assert_eq!(outcome.results.len(), 1);

    let build = outcome.results[0];
    assert_eq!(build.levels, SkillLevels::zero());
    assert_eq!(build.point_cost, 0);
    // pool 120 + 9 * 10 = 210 health, 21 attacks of round(100 * 1.1) = 110
    assert_eq!(build.daily_damage, 2310.0);
}

#[test]
fn test_budget_55_top_build_dominates_single_dimension_builds() {
    let request = SearchRequest::new(55);
    let outcome = run_search(&request, &OptimizerConfig::default(), None).unwrap();
    assert_eq!(outcome.results.len(), 10);

    let model = FightModel::new(Modifiers::none(), Scenario::default());
    let top = outcome.results[0];
    for skill in Skill::ALL {
        let maxed = model.evaluate(SkillLevels::zero().with(skill, 10));
        assert_eq!(maxed.point_cost, 55);
        assert!(
            top.daily_damage >= maxed.daily_damage,
            "{} maxed deals {} > {}",
            skill,
            maxed.daily_damage,
            top.daily_damage
        );
    }

    assert_eq!(top.levels, SkillLevels::new([7, 0, 0, 1, 2, 2, 4, 4]));
    assert_eq!(top.daily_damage, 12_549.0);
    assert!(outcome
        .results
        .windows(2)
        .all(|w| w[0].daily_damage >= w[1].daily_damage));
    assert!(outcome.results.iter().all(|c| c.point_cost <= 55));
}
