use anyhow::{bail, Result};
use clap::{value_parser, Args};
use dialoguer::Confirm;

use roster_forecast::models::{
    Athlete, AthleteUpdate, EventGroup, Gender, Mark, Roster, RosterFilter, Tier,
    MAX_GRADUATION_YEAR, MIN_GRADUATION_YEAR,
};
use roster_forecast::services::ScholarshipService;

use super::current_year;
use crate::config::Config;
use crate::storage::RosterStore;
use crate::ui::report::{render_athlete, render_athlete_table};
use crate::ui::widgets::{render_success, render_warning};

/// Athlete attributes shared by `add` and `edit`
#[derive(Args, Debug, Default)]
pub struct AthleteFields {
    /// men or women
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Event group (sprints, hurdles, distance, jumps, throws, multi-events)
    #[arg(long = "group")]
    pub event_group: Option<EventGroup>,

    /// Primary event, e.g. "400m" or "Pole Vault"
    #[arg(long = "event")]
    pub primary_event: Option<String>,

    /// Performance tier (elite, competitive, developing, prospect)
    #[arg(long)]
    pub tier: Option<Tier>,

    /// Cumulative GPA on a 4.0 scale
    #[arg(long)]
    pub gpa: Option<f64>,

    /// Annual scholarship in dollars
    #[arg(long = "scholarship")]
    pub scholarship_amount: Option<f64>,

    /// Final season on the roster
    #[arg(long = "grad-year")]
    pub graduation_year: Option<i32>,

    /// Personal best, e.g. 10.45, 1:52.30, 7.45m or 6120 pts
    #[arg(long = "pb")]
    pub personal_best: Option<String>,

    /// Season best in the same format as --pb
    #[arg(long = "sb")]
    pub season_best: Option<String>,

    #[arg(long)]
    pub conference_rank: Option<u32>,

    #[arg(long)]
    pub national_rank: Option<u32>,
}

impl AthleteFields {
    /// Build an edit; marks are read for `event_group` unless the edit moves groups
    pub fn into_update(self, name: Option<String>, event_group: EventGroup) -> Result<AthleteUpdate> {
        let group = self.event_group.unwrap_or(event_group);

        Ok(AthleteUpdate {
            name,
            gender: self.gender,
            event_group: self.event_group,
            primary_event: self.primary_event,
            tier: self.tier,
            gpa: self.gpa,
            scholarship_amount: self.scholarship_amount,
            graduation_year: self.graduation_year,
            personal_best: parse_mark(self.personal_best.as_deref(), group)?,
            season_best: parse_mark(self.season_best.as_deref(), group)?,
            conference_rank: self.conference_rank,
            national_rank: self.national_rank,
        })
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Only this gender
    #[arg(long)]
    gender: Option<Gender>,

    /// Only this tier
    #[arg(long)]
    tier: Option<Tier>,

    /// Only this event group
    #[arg(long = "group")]
    event_group: Option<EventGroup>,

    /// Include archived athletes
    #[arg(short, long)]
    all: bool,

    /// Season used for class years
    #[arg(long, value_parser = value_parser!(i32).range(i64::from(MIN_GRADUATION_YEAR)..=i64::from(MAX_GRADUATION_YEAR)))]
    year: Option<i32>,
}

impl ListCommand {
    pub async fn execute(self, store: &RosterStore) -> Result<()> {
        let roster = store.load()?;
        let filter = RosterFilter {
            gender: self.gender,
            tier: self.tier,
            event_group: self.event_group,
            include_archived: self.all,
        };

        let athletes: Vec<&Athlete> = roster.filter(&filter).collect();
        render_athlete_table(&athletes, self.year.unwrap_or_else(current_year));

        Ok(())
    }
}

pub async fn show_athlete(store: &RosterStore, config: &Config, who: &str) -> Result<()> {
    let roster = store.load()?;
    let athlete = roster.find(who)?;

    render_athlete(athlete, current_year(), &config.scholarship_policy());

    Ok(())
}

pub async fn add_athlete(
    store: &RosterStore,
    config: &Config,
    name: String,
    fields: AthleteFields,
    allow_over_limit: bool,
) -> Result<()> {
    let (Some(gender), Some(event_group), Some(tier), Some(gpa), Some(graduation_year)) = (
        fields.gender,
        fields.event_group,
        fields.tier,
        fields.gpa,
        fields.graduation_year,
    ) else {
        bail!("--gender, --group, --tier, --gpa and --grad-year are required to add an athlete");
    };

    let mut roster = store.load()?;
    let scholarship_amount = fields.scholarship_amount.unwrap_or(0.0);

    let mut athlete = Athlete::new(
        name,
        gender,
        event_group,
        tier,
        gpa,
        scholarship_amount,
        graduation_year,
    )
    .with_ranking(fields.conference_rank, fields.national_rank);
    if let Some(event) = fields.primary_event {
        athlete = athlete.with_primary_event(event);
    }
    if let Some(pb) = parse_mark(fields.personal_best.as_deref(), event_group)? {
        athlete = athlete.with_personal_best(pb);
    }
    if let Some(sb) = parse_mark(fields.season_best.as_deref(), event_group)? {
        athlete = athlete.with_season_best(sb);
    }

    let service = ScholarshipService::new(config.scholarship_policy());
    if let Err(e) = service.check_new_allocation(&roster, gender, scholarship_amount) {
        over_limit(e.into(), allow_over_limit)?;
    }

    let summary = format!("Added {} ({})", athlete.name, athlete.id);
    roster.add(athlete)?;
    store.save(&roster)?;

    render_success(&summary);
    Ok(())
}

pub async fn edit_athlete(
    store: &RosterStore,
    config: &Config,
    who: &str,
    name: Option<String>,
    fields: AthleteFields,
    allow_over_limit: bool,
) -> Result<()> {
    let mut roster = store.load()?;
    let (id, event_group) = {
        let athlete = roster.find(who)?;
        (athlete.id.clone(), athlete.event_group)
    };

    let aid_changed = fields.scholarship_amount.is_some() || fields.gender.is_some();
    let update = fields.into_update(name, event_group)?;
    if is_empty_update(&update) {
        bail!("Nothing to change; pass at least one field to edit");
    }

    let amount = roster.update(&id, update)?.scholarship_amount;

    if aid_changed {
        let service = ScholarshipService::new(config.scholarship_policy());
        if let Err(e) = service.check_allocation(&roster, &id, amount) {
            over_limit(e.into(), allow_over_limit)?;
        }
    }

    store.save(&roster)?;

    render_success(&format!("Updated {}", who));
    Ok(())
}

pub async fn archive_athlete(store: &RosterStore, who: &str) -> Result<()> {
    let mut roster = store.load()?;
    let (id, name) = find_id(&roster, who)?;

    roster.archive(&id)?;
    store.save(&roster)?;

    render_success(&format!("Archived {}", name));
    Ok(())
}

pub async fn restore_athlete(store: &RosterStore, config: &Config, who: &str) -> Result<()> {
    let mut roster = store.load()?;
    let (id, name) = find_id(&roster, who)?;

    roster.restore(&id)?;

    let amount = roster.get(&id).map(|a| a.scholarship_amount).unwrap_or(0.0);
    let service = ScholarshipService::new(config.scholarship_policy());
    if let Err(e) = service.check_allocation(&roster, &id, amount) {
        render_warning(&e.to_string());
    }

    store.save(&roster)?;

    render_success(&format!("Restored {}", name));
    Ok(())
}

pub async fn delete_athlete(store: &RosterStore, who: &str, force: bool) -> Result<()> {
    let mut roster = store.load()?;
    let (id, name) = find_id(&roster, who)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} permanently?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    roster.remove(&id)?;
    store.save(&roster)?;

    render_success(&format!("Deleted {}", name));
    Ok(())
}

fn find_id(roster: &Roster, who: &str) -> Result<(String, String)> {
    let athlete = roster.find(who)?;
    Ok((athlete.id.clone(), athlete.name.clone()))
}

fn parse_mark(text: Option<&str>, event_group: EventGroup) -> Result<Option<Mark>> {
    match text {
        Some(text) => Ok(Some(Mark::parse(text, event_group)?)),
        None => Ok(None),
    }
}

/// Fail on a limit breach unless the caller explicitly allowed it
fn over_limit(error: anyhow::Error, allow: bool) -> Result<()> {
    if allow {
        render_warning(&format!("{} (saved anyway)", error));
        Ok(())
    } else {
        Err(error.context("Use --allow-over-limit to save anyway"))
    }
}

fn is_empty_update(update: &AthleteUpdate) -> bool {
    update.name.is_none()
        && update.gender.is_none()
        && update.event_group.is_none()
        && update.primary_event.is_none()
        && update.tier.is_none()
        && update.gpa.is_none()
        && update.scholarship_amount.is_none()
        && update.graduation_year.is_none()
        && update.personal_best.is_none()
        && update.season_best.is_none()
        && update.conference_rank.is_none()
        && update.national_rank.is_none()
}
