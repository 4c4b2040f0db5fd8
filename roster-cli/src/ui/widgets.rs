use colored::{ColoredString, Colorize};

use roster_forecast::models::{
    AcademicStanding, ImpactLevel, Projection, RecruitingPriority, Tier,
};

const GAUGE_WIDTH: usize = 20;

/// Render a report title with an underline
pub fn render_title(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count().max(32)).dimmed());
}

/// Render a section heading inside a report
pub fn render_section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Render a `label: value` line
pub fn render_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", format!("{}:", label).dimmed(), value);
}

/// Utilization bar, red once past the limit
pub fn gauge(percentage: f64) -> ColoredString {
    let filled = ((percentage / 100.0) * GAUGE_WIDTH as f64)
        .round()
        .clamp(0.0, GAUGE_WIDTH as f64) as usize;
    let bar = format!(
        "[{}{}] {:>5.1}%",
        "█".repeat(filled),
        " ".repeat(GAUGE_WIDTH - filled),
        percentage
    );

    if percentage > 100.0 {
        bar.red().bold()
    } else if percentage >= 90.0 {
        bar.yellow()
    } else {
        bar.green()
    }
}

/// Dollars with thousands separators, no cents
pub fn money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `expected (low to high)` with the given precision
pub fn projection(value: &Projection, decimals: usize) -> String {
    format!(
        "{:.*} ({:.*} to {:.*})",
        decimals, value.expected, decimals, value.low, decimals, value.high
    )
}

/// Same as [`projection`] for dollar amounts
pub fn money_projection(value: &Projection) -> String {
    format!(
        "{} ({} to {})",
        money(value.expected),
        money(value.low),
        money(value.high)
    )
}

pub fn tier_label(tier: Tier, width: usize) -> ColoredString {
    let text = format!("{:<width$}", tier.to_string(), width = width);
    match tier {
        Tier::Elite => text.magenta().bold(),
        Tier::Competitive => text.green(),
        Tier::Developing => text.yellow(),
        Tier::Prospect => text.normal(),
    }
}

pub fn priority_label(priority: RecruitingPriority) -> ColoredString {
    let text = format!("{:<6}", priority.to_string());
    match priority {
        RecruitingPriority::High => text.red().bold(),
        RecruitingPriority::Medium => text.yellow(),
        RecruitingPriority::Low => text.dimmed(),
    }
}

pub fn impact_label(level: ImpactLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        ImpactLevel::Severe => text.red().bold(),
        ImpactLevel::Significant => text.yellow().bold(),
        ImpactLevel::Moderate => text.yellow(),
        ImpactLevel::None => text.dimmed(),
    }
}

pub fn standing_label(standing: AcademicStanding) -> ColoredString {
    match standing {
        AcademicStanding::AtRisk => standing.to_string().red().bold(),
        AcademicStanding::Watch => standing.to_string().yellow(),
    }
}

/// Success line used after a command changed the roster
pub fn render_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn render_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}
