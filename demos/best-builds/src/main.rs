//! Best Builds Example
//!
//! Searches every skill build that fits a point budget and prints the ones
//! dealing the most damage per day.
//!
//! ```text
//! cargo run -p best-builds -- [budget] [equipment tier]
//! ```
//!
//! Passing an equipment tier turns on cost-aware mode, which prices each
//! build's daily upkeep from the live market feed configured in
//! `fightforge.toml`.

use fightforge::prelude::*;
use fightforge::SearchOutcome;

const DEFAULT_BUDGET: u32 = 55;

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let budget = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_BUDGET);
    let tier = args.next().and_then(|s| EquipmentTier::parse(&s));

    let scenario = Scenario::new(HealingItem::Steak, AmmoTier::Standard);
    let mut request = SearchRequest::new(budget).with_scenario(scenario);
    if let Some(tier) = tier {
        request = request.with_equipment_tier(tier);
    }
    let modifiers = request.modifiers;

    match optimize(request).await {
        Ok(outcome) => print_builds(&outcome, &modifiers),
        Err(e) => {
            eprintln!("search failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_builds(outcome: &SearchOutcome, modifiers: &Modifiers) {
    println!(
        "\n{} of {} builds fit the budget",
        outcome.retained, outcome.processed
    );

    for (rank, build) in outcome.results.iter().enumerate() {
        print!(
            "\n#{:<2} {:>10.0} damage/day  {:>3} points",
            rank + 1,
            build.daily_damage,
            build.point_cost
        );
        if let Some(cost) = build.daily_cost {
            print!("  {:>8.2} cost/day", cost);
        }
        println!();

        let stats = build.effective_stats(modifiers);
        for skill in Skill::ALL {
            println!(
                "    {:<10} lvl {:>2}  {}",
                skill,
                build.levels.get(skill),
                skill.format_value(stats.get(skill))
            );
        }
    }
}
