//! Text reports for the roster and its forecasts

use colored::Colorize;

use roster_forecast::models::{
    Athlete, GenderAllocation, GraduationForecast, PerformanceForecast, RecruitingForecast,
    RosterForecast, RosterStats, ScholarshipForecast, ScholarshipPolicy,
};
use roster_forecast::services::{projected_mark_for, ImportReport};

use super::widgets::{
    gauge, impact_label, money, money_projection, priority_label, projection, render_field,
    render_section, render_title, standing_label, tier_label,
};

pub fn render_athlete_table(athletes: &[&Athlete], year: i32) {
    if athletes.is_empty() {
        println!("No athletes match.");
        return;
    }

    println!(
        "{}",
        format!(
            "{:<8} {:<22} {:<6} {:<13} {:<12} {:<10} {:>5} {:>9} {:>5}",
            "ID", "Name", "Gender", "Group", "Tier", "Class", "GPA", "Aid", "Grad"
        )
        .bold()
    );

    for athlete in athletes {
        let name = if athlete.is_active() {
            athlete.name.clone()
        } else {
            format!("{} (archived)", athlete.name)
        };

        println!(
            "{:<8} {:<22} {:<6} {:<13} {} {:<10} {:>5.2} {:>9} {:>5}",
            short_id(&athlete.id),
            truncate(&name, 22),
            athlete.gender.to_string(),
            athlete.event_group.to_string(),
            tier_label(athlete.tier, 12),
            athlete.class_year(year).to_string(),
            athlete.gpa,
            money(athlete.scholarship_amount),
            athlete.graduation_year
        );
    }

    println!();
    println!("{} athletes", athletes.len());
}

pub fn render_athlete(athlete: &Athlete, year: i32, policy: &ScholarshipPolicy) {
    render_title(&athlete.name);
    render_field("ID", &athlete.id);
    render_field("Status", athlete.status);
    render_field("Gender", athlete.gender);
    render_field("Event group", athlete.event_group);
    if !athlete.performance.primary_event.is_empty() {
        render_field("Primary event", &athlete.performance.primary_event);
    }
    render_field("Tier", tier_label(athlete.tier, 0));
    render_field(
        "Class",
        format!("{} (graduates {})", athlete.class_year(year), athlete.graduation_year),
    );
    render_field("GPA", format!("{:.2}", athlete.gpa));
    render_field(
        "Scholarship",
        format!(
            "{} ({:.3} equivalency)",
            money(athlete.scholarship_amount),
            athlete.equivalency(policy.full_scholarship_value)
        ),
    );

    if let Some(pb) = athlete.performance.personal_best {
        render_field("Personal best", pb);
    }
    if let Some(sb) = athlete.performance.season_best {
        render_field("Season best", sb);
    }
    if let Some(rank) = athlete.ranking.conference {
        render_field("Conference rank", format!("#{}", rank));
    }
    if let Some(rank) = athlete.ranking.national {
        render_field("National rank", format!("#{}", rank));
    }
}

pub fn render_stats(stats: &RosterStats, allocations: &[GenderAllocation]) {
    render_title(&format!("Roster Overview {}", stats.reference_year));
    render_field("Active athletes", stats.active_athletes);
    render_field("Archived athletes", stats.archived_athletes);

    render_section("Composition");
    for (gender, count) in &stats.by_gender {
        render_field(&gender.to_string(), count);
    }
    for (tier, count) in &stats.by_tier {
        render_field(&tier.to_string(), count);
    }
    for (group, count) in &stats.by_event_group {
        render_field(&group.to_string(), count);
    }
    for (class_year, count) in &stats.by_class_year {
        render_field(&class_year.to_string(), count);
    }

    render_section("Academics");
    match (stats.average_gpa, stats.gpa_std_dev) {
        (Some(avg), Some(sd)) => render_field("Team GPA", format!("{:.2} (sd {:.2})", avg, sd)),
        (Some(avg), None) => render_field("Team GPA", format!("{:.2}", avg)),
        _ => render_field("Team GPA", "n/a"),
    }
    for (gender, gpa) in &stats.average_gpa_by_gender {
        render_field(&format!("{} GPA", gender), format!("{:.2}", gpa));
    }
    for (tier, gpa) in &stats.average_gpa_by_tier {
        render_field(&format!("{} GPA", tier), format!("{:.2}", gpa));
    }
    if stats.academic_watch_list.is_empty() {
        println!("  Nobody on the academic watch list");
    } else {
        for flag in &stats.academic_watch_list {
            println!(
                "  {:<24} {:.2}  {}",
                truncate(&flag.name, 24),
                flag.gpa,
                standing_label(flag.level)
            );
        }
    }

    render_section("Scholarships");
    render_field("Total committed", money(stats.total_scholarship_dollars));
    for (tier, dollars) in &stats.scholarship_dollars_by_tier {
        render_field(&tier.to_string(), money(*dollars));
    }
    println!();
    render_allocation_rows(allocations);
}

pub fn render_allocations(allocations: &[GenderAllocation]) {
    render_title("Scholarship Allocation");
    render_allocation_rows(allocations);
}

fn render_allocation_rows(allocations: &[GenderAllocation]) {
    for allocation in allocations {
        println!(
            "  {:<6} {:>6.2} / {:<5.2} {}  {} on aid, {} remaining",
            allocation.gender.to_string(),
            allocation.equivalencies,
            allocation.limit,
            gauge(allocation.utilization_percentage),
            allocation.athletes_on_aid,
            format!("{:.2}", allocation.remaining)
        );
        if allocation.over_limit {
            println!(
                "         {}",
                format!("over the {} limit", allocation.gender).red().bold()
            );
        }
    }
}

pub fn render_scholarship_forecast(forecast: &ScholarshipForecast) {
    render_title("Scholarship Forecast");

    for year in &forecast.years {
        render_section(&format!("{} (cost x{:.3})", year.year, year.cost_factor));
        for gender in &year.by_gender {
            println!(
                "  {:<6} {:>2} on aid  {:>6.2} eq  {}  {} available",
                gender.gender.to_string(),
                gender.athletes_on_aid,
                gender.committed_equivalencies,
                gauge(gender.utilization_percentage),
                money(gender.available_dollars)
            );
        }
        render_field("Committed", money(year.committed_dollars));
        render_field("Available", money(year.available_dollars));
        render_field("Projected spending", money_projection(&year.projected_spending));
    }
}

pub fn render_graduation_forecast(forecast: &GraduationForecast) {
    render_title("Graduation Impact");

    for year in &forecast.years {
        render_section(&format!(
            "Class of {}: {} departing",
            year.year,
            year.departing.len()
        ));
        render_field("Impact", impact_label(year.impact_level));
        render_field("Impact score", projection(&year.impact_projection, 2));
        render_field("Returning", year.returning_athletes);
        render_field(
            "Aid freed",
            format!(
                "{} ({:.2} eq)",
                money(year.scholarship_dollars_freed),
                year.equivalencies_freed
            ),
        );
        if let Some(gpa) = year.average_departing_gpa {
            render_field("Departing GPA", format!("{:.2}", gpa));
        }

        for athlete in &year.departing {
            println!(
                "    {:<24} {:<6} {:<13} {}",
                truncate(&athlete.name, 24),
                athlete.gender.to_string(),
                athlete.event_group.to_string(),
                tier_label(athlete.tier, 0)
            );
        }
    }

    println!();
    println!("{} departures over the horizon", forecast.total_departures);
}

pub fn render_performance_forecast(forecast: &PerformanceForecast) {
    render_title("Performance Projection");

    for year in &forecast.years {
        render_section(&year.year.to_string());
        render_field("Enrolled", year.enrolled_athletes);
        if let Some(avg) = year.average_tier_score {
            render_field("Average tier score", format!("{:.2}", avg));
        }
        render_field("Team strength", projection(&year.team_strength, 2));
        render_field("Promotions", year.projected_promotions);
        let distribution: Vec<String> = year
            .tier_distribution
            .iter()
            .map(|(tier, count)| format!("{} {}", tier, count))
            .collect();
        if !distribution.is_empty() {
            render_field("Tiers", distribution.join(", "));
        }
    }

    let final_year = forecast.years.last().map(|y| y.year);

    render_section("Athletes");
    for athlete in &forecast.athletes {
        let Some(last) = athlete.final_season() else {
            continue;
        };

        let mark = final_year
            .and_then(|year| projected_mark_for(athlete, year))
            .or(last.projected_mark);
        let marks = match (athlete.personal_best, mark) {
            (Some(pb), Some(projected)) => format!("{} -> {}", pb, projected),
            _ => "no mark".dimmed().to_string(),
        };

        println!(
            "  {:<24} {} -> {} ({} {})  {}",
            truncate(&athlete.name, 24),
            tier_label(athlete.current_tier, 0),
            tier_label(last.projected_tier, 0),
            last.class_year,
            last.year,
            marks
        );
    }
}

pub fn render_recruiting_forecast(forecast: &RecruitingForecast) {
    render_title("Recruiting Needs");

    let mut years: Vec<i32> = forecast.budgets.iter().map(|b| b.year).collect();
    years.dedup();

    for year in years {
        render_section(&year.to_string());

        for need in forecast.needs.iter().filter(|n| n.year == year) {
            println!(
                "  {} {:<6} {:<13} need {:>2}  (target {}, returning {}, recruits {}, leaving {})",
                priority_label(need.priority),
                need.gender.to_string(),
                need.event_group.to_string(),
                need.needed,
                need.target,
                need.returning,
                need.recruits_present,
                need.departures
            );
        }

        for budget in forecast.budgets.iter().filter(|b| b.year == year) {
            if budget.recruits_needed == 0 {
                continue;
            }
            println!(
                "  {:<6} {} recruits ({}), {:.2} eq available, {:.2} eq each",
                budget.gender.to_string(),
                budget.recruits_needed,
                projection(&budget.recruits_projection, 1),
                budget.available_equivalencies,
                budget.suggested_equivalency_per_recruit
            );
        }
    }

    println!();
    println!("{} recruits needed in total", forecast.total_recruits_needed);
}

pub fn render_forecast(forecast: &RosterForecast) {
    println!(
        "{}",
        format!(
            "{}-year forecast from {} at {} confidence ({} active athletes)",
            forecast.horizon_years,
            forecast.base_year,
            forecast.confidence,
            forecast.athletes_considered
        )
        .dimmed()
    );
    println!();

    render_scholarship_forecast(&forecast.scholarships);
    println!();
    render_graduation_forecast(&forecast.graduation);
    println!();
    render_performance_forecast(&forecast.performance);
    println!();
    render_recruiting_forecast(&forecast.recruiting);
}

pub fn render_import_report(report: &ImportReport) {
    for error in &report.errors {
        println!("  {} {}", "✗".red(), error);
    }
    if !report.is_clean() {
        println!(
            "{} of {} rows rejected",
            report.rejected_rows(),
            report.rows_read
        );
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
