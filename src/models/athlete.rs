use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mark::Mark;
use crate::error::{Result, RosterError};

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;
pub const MIN_GRADUATION_YEAR: i32 = 1950;
pub const MAX_GRADUATION_YEAR: i32 = 2100;

/// Athlete record held in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub event_group: EventGroup,
    pub performance: AthleticPerformance,
    pub ranking: Ranking,
    pub tier: Tier,
    pub gpa: f64,
    pub scholarship_amount: f64, // dollars per academic year
    pub graduation_year: i32,
    pub status: AthleteStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleticPerformance {
    pub primary_event: String, // "100m", "Pole Vault", "Heptathlon", ...
    pub personal_best: Option<Mark>,
    pub season_best: Option<Mark>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub conference: Option<u32>,
    pub national: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
}

/// Qualitative athlete ranking used as a weighting input to forecasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Elite,
    Competitive,
    Developing,
    Prospect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventGroup {
    Sprints,
    Hurdles,
    Distance,
    Jumps,
    Throws,
    MultiEvents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteStatus {
    Active,
    Archived,
}

/// Academic class relative to a reference season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Alumni,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Men, Gender::Women];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Elite, Tier::Competitive, Tier::Developing, Tier::Prospect];

    /// Forecast weight of an athlete at this tier
    pub fn weight(&self) -> f64 {
        match self {
            Tier::Elite => 1.0,
            Tier::Competitive => 0.75,
            Tier::Developing => 0.5,
            Tier::Prospect => 0.25,
        }
    }

    /// Position on the 1.0 (prospect) to 4.0 (elite) development scale
    pub fn score(&self) -> f64 {
        match self {
            Tier::Elite => 4.0,
            Tier::Competitive => 3.0,
            Tier::Developing => 2.0,
            Tier::Prospect => 1.0,
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 3.5 {
            Tier::Elite
        } else if score >= 2.5 {
            Tier::Competitive
        } else if score >= 1.5 {
            Tier::Developing
        } else {
            Tier::Prospect
        }
    }

    /// Fraction of a mark an athlete at this tier improves per season.
    /// Lower tiers have more headroom.
    pub fn annual_improvement_rate(&self) -> f64 {
        match self {
            Tier::Elite => 0.005,
            Tier::Competitive => 0.0125,
            Tier::Developing => 0.02,
            Tier::Prospect => 0.03,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Competitive => "competitive",
            Tier::Developing => "developing",
            Tier::Prospect => "prospect",
        }
    }
}

impl EventGroup {
    pub const ALL: [EventGroup; 6] = [
        EventGroup::Sprints,
        EventGroup::Hurdles,
        EventGroup::Distance,
        EventGroup::Jumps,
        EventGroup::Throws,
        EventGroup::MultiEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventGroup::Sprints => "sprints",
            EventGroup::Hurdles => "hurdles",
            EventGroup::Distance => "distance",
            EventGroup::Jumps => "jumps",
            EventGroup::Throws => "throws",
            EventGroup::MultiEvents => "multi-events",
        }
    }
}

impl AthleteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AthleteStatus::Active => "active",
            AthleteStatus::Archived => "archived",
        }
    }
}

impl ClassYear {
    /// Class of an athlete graduating in `graduation_year`, seen from `year`
    pub fn for_years(graduation_year: i32, year: i32) -> Self {
        match graduation_year.saturating_sub(year) {
            d if d < 0 => ClassYear::Alumni,
            0 => ClassYear::Senior,
            1 => ClassYear::Junior,
            2 => ClassYear::Sophomore,
            _ => ClassYear::Freshman,
        }
    }

    /// Tier score gained when entering a season in this class
    pub fn development_gain(&self) -> f64 {
        match self {
            ClassYear::Freshman => 0.5,
            ClassYear::Sophomore => 0.4,
            ClassYear::Junior => 0.3,
            ClassYear::Senior => 0.2,
            ClassYear::Alumni => 0.0,
        }
    }
}

impl Athlete {
    /// Create a new active athlete with a generated ID
    pub fn new(
        name: String,
        gender: Gender,
        event_group: EventGroup,
        tier: Tier,
        gpa: f64,
        scholarship_amount: f64,
        graduation_year: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            gender,
            event_group,
            performance: AthleticPerformance {
                primary_event: event_group.to_string(),
                personal_best: None,
                season_best: None,
            },
            ranking: Ranking::default(),
            tier,
            gpa,
            scholarship_amount,
            graduation_year,
            status: AthleteStatus::Active,
        }
    }

    pub fn with_primary_event(mut self, event: impl Into<String>) -> Self {
        self.performance.primary_event = event.into();
        self
    }

    pub fn with_personal_best(mut self, mark: Mark) -> Self {
        self.performance.personal_best = Some(mark);
        self
    }

    pub fn with_season_best(mut self, mark: Mark) -> Self {
        self.performance.season_best = Some(mark);
        self
    }

    pub fn with_ranking(mut self, conference: Option<u32>, national: Option<u32>) -> Self {
        self.ranking = Ranking {
            conference,
            national,
        };
        self
    }

    /// Check field ranges, returning the first violation
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_gpa(self.gpa)?;
        validate_scholarship(self.scholarship_amount)?;
        validate_graduation_year(self.graduation_year)?;
        validate_rank("conference_rank", self.ranking.conference)?;
        validate_rank("national_rank", self.ranking.national)?;
        Ok(())
    }

    /// Apply a partial edit
    pub fn update(&mut self, update: AthleteUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(group) = update.event_group {
            self.event_group = group;
        }
        if let Some(event) = update.primary_event {
            self.performance.primary_event = event;
        }
        if let Some(tier) = update.tier {
            self.tier = tier;
        }
        if let Some(gpa) = update.gpa {
            self.gpa = gpa;
        }
        if let Some(amount) = update.scholarship_amount {
            self.scholarship_amount = amount;
        }
        if let Some(year) = update.graduation_year {
            self.graduation_year = year;
        }
        if update.personal_best.is_some() {
            self.performance.personal_best = update.personal_best;
        }
        if update.season_best.is_some() {
            self.performance.season_best = update.season_best;
        }
        if update.conference_rank.is_some() {
            self.ranking.conference = update.conference_rank;
        }
        if update.national_rank.is_some() {
            self.ranking.national = update.national_rank;
        }
    }

    pub fn archive(&mut self) {
        self.status = AthleteStatus::Archived;
    }

    pub fn restore(&mut self) {
        self.status = AthleteStatus::Active;
    }

    pub fn is_active(&self) -> bool {
        self.status == AthleteStatus::Active
    }

    /// Still on the roster during the season of `year`
    pub fn is_enrolled_in(&self, year: i32) -> bool {
        self.is_active() && self.graduation_year >= year
    }

    pub fn class_year(&self, year: i32) -> ClassYear {
        ClassYear::for_years(self.graduation_year, year)
    }

    /// Seasons left after `year`, zero once graduated
    pub fn years_remaining(&self, year: i32) -> u32 {
        self.graduation_year.saturating_sub(year).max(0) as u32
    }

    /// Scholarship expressed as a fraction of a full scholarship
    pub fn equivalency(&self, full_scholarship_value: f64) -> f64 {
        if full_scholarship_value <= 0.0 {
            return 0.0;
        }
        self.scholarship_amount / full_scholarship_value
    }
}

/// Fields changed by an edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct AthleteUpdate {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub event_group: Option<EventGroup>,
    pub primary_event: Option<String>,
    pub tier: Option<Tier>,
    pub gpa: Option<f64>,
    pub scholarship_amount: Option<f64>,
    pub graduation_year: Option<i32>,
    pub personal_best: Option<Mark>,
    pub season_best: Option<Mark>,
    pub conference_rank: Option<u32>,
    pub national_rank: Option<u32>,
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RosterError::invalid_field("name", "must not be empty"));
    }
    Ok(())
}

pub fn validate_gpa(gpa: f64) -> Result<()> {
    if !gpa.is_finite() || !(MIN_GPA..=MAX_GPA).contains(&gpa) {
        return Err(RosterError::invalid_field(
            "gpa",
            format!("{} is outside {:.1}-{:.1}", gpa, MIN_GPA, MAX_GPA),
        ));
    }
    Ok(())
}

pub fn validate_scholarship(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RosterError::invalid_field(
            "scholarship_amount",
            format!("{} must be a non-negative amount", amount),
        ));
    }
    Ok(())
}

pub fn validate_graduation_year(year: i32) -> Result<()> {
    if !(MIN_GRADUATION_YEAR..=MAX_GRADUATION_YEAR).contains(&year) {
        return Err(RosterError::invalid_field(
            "graduation_year",
            format!(
                "{} is outside {}-{}",
                year, MIN_GRADUATION_YEAR, MAX_GRADUATION_YEAR
            ),
        ));
    }
    Ok(())
}

pub fn validate_rank(field: &str, rank: Option<u32>) -> Result<()> {
    if rank == Some(0) {
        return Err(RosterError::invalid_field(field, "ranks start at 1"));
    }
    Ok(())
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "Men"),
            Gender::Women => write!(f, "Women"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" | "m" | "male" | "man" => Ok(Gender::Men),
            "women" | "w" | "f" | "female" | "woman" => Ok(Gender::Women),
            _ => Err(RosterError::invalid_field(
                "gender",
                format!("unknown gender '{}'", s),
            )),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Elite => write!(f, "Elite"),
            Tier::Competitive => write!(f, "Competitive"),
            Tier::Developing => write!(f, "Developing"),
            Tier::Prospect => write!(f, "Prospect"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elite" => Ok(Tier::Elite),
            "competitive" => Ok(Tier::Competitive),
            "developing" => Ok(Tier::Developing),
            "prospect" => Ok(Tier::Prospect),
            _ => Err(RosterError::invalid_field(
                "tier",
                format!("unknown tier '{}'", s),
            )),
        }
    }
}

impl std::fmt::Display for EventGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventGroup::Sprints => write!(f, "Sprints"),
            EventGroup::Hurdles => write!(f, "Hurdles"),
            EventGroup::Distance => write!(f, "Distance"),
            EventGroup::Jumps => write!(f, "Jumps"),
            EventGroup::Throws => write!(f, "Throws"),
            EventGroup::MultiEvents => write!(f, "Multi-Events"),
        }
    }
}

impl std::str::FromStr for EventGroup {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "sprints" | "sprint" => Ok(EventGroup::Sprints),
            "hurdles" | "hurdle" => Ok(EventGroup::Hurdles),
            "distance" | "middledistance" | "xc" => Ok(EventGroup::Distance),
            "jumps" | "jump" => Ok(EventGroup::Jumps),
            "throws" | "throw" => Ok(EventGroup::Throws),
            "multievents" | "multis" | "multi" | "combined" => Ok(EventGroup::MultiEvents),
            _ => Err(RosterError::invalid_field(
                "event_group",
                format!("unknown event group '{}'", s),
            )),
        }
    }
}

impl std::fmt::Display for AthleteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AthleteStatus::Active => write!(f, "Active"),
            AthleteStatus::Archived => write!(f, "Archived"),
        }
    }
}

impl std::str::FromStr for AthleteStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "active" => Ok(AthleteStatus::Active),
            "archived" | "inactive" => Ok(AthleteStatus::Archived),
            _ => Err(RosterError::invalid_field(
                "status",
                format!("unknown status '{}'", s),
            )),
        }
    }
}

impl std::fmt::Display for ClassYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassYear::Freshman => write!(f, "Freshman"),
            ClassYear::Sophomore => write!(f, "Sophomore"),
            ClassYear::Junior => write!(f, "Junior"),
            ClassYear::Senior => write!(f, "Senior"),
            ClassYear::Alumni => write!(f, "Alumni"),
        }
    }
}
