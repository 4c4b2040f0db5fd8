use serde::{Deserialize, Serialize};

use super::athlete::{Athlete, AthleteUpdate, EventGroup, Gender, Tier};
use crate::error::{Result, RosterError};

/// The team roster, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    athletes: Vec<Athlete>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids
    pub fn from_athletes(athletes: Vec<Athlete>) -> Result<Self> {
        let mut roster = Self::new();
        for athlete in athletes {
            roster.add(athlete)?;
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Athlete> {
        self.athletes.iter()
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    /// Active athletes only
    pub fn active(&self) -> impl Iterator<Item = &Athlete> {
        self.athletes.iter().filter(|a| a.is_active())
    }

    /// Add an athlete after validating it
    pub fn add(&mut self, athlete: Athlete) -> Result<()> {
        athlete.validate()?;
        if self.get(&athlete.id).is_some() {
            return Err(RosterError::DuplicateAthlete(athlete.id));
        }

        tracing::debug!("Added athlete {} ({})", athlete.name, athlete.id);
        self.athletes.push(athlete);
        Ok(())
    }

    /// Insert or replace by id
    pub fn upsert(&mut self, athlete: Athlete) -> Result<()> {
        athlete.validate()?;
        match self.athletes.iter_mut().find(|a| a.id == athlete.id) {
            Some(existing) => *existing = athlete,
            None => self.athletes.push(athlete),
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id == id)
    }

    /// Look up by exact id, falling back to a unique case-insensitive name
    pub fn find(&self, query: &str) -> Result<&Athlete> {
        if let Some(athlete) = self.get(query) {
            return Ok(athlete);
        }

        let needle = query.trim().to_lowercase();
        let matches: Vec<&Athlete> = self
            .athletes
            .iter()
            .filter(|a| a.name.to_lowercase() == needle)
            .collect();

        match matches.len() {
            0 => Err(RosterError::AthleteNotFound(query.to_string())),
            1 => Ok(matches[0]),
            n => Err(RosterError::AmbiguousAthlete {
                query: query.to_string(),
                matches: n,
            }),
        }
    }

    /// Apply an edit; the athlete is left untouched when the result is invalid
    pub fn update(&mut self, id: &str, update: AthleteUpdate) -> Result<&Athlete> {
        let index = self.index_of(id)?;

        let mut edited = self.athletes[index].clone();
        edited.update(update);
        edited.validate()?;

        self.athletes[index] = edited;
        tracing::debug!("Updated athlete {}", id);
        Ok(&self.athletes[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<Athlete> {
        let index = self.index_of(id)?;
        let removed = self.athletes.remove(index);
        tracing::debug!("Removed athlete {}", id);
        Ok(removed)
    }

    pub fn archive(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        self.athletes[index].archive();
        Ok(())
    }

    pub fn restore(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        self.athletes[index].restore();
        Ok(())
    }

    pub fn filter<'a>(&'a self, filter: &'a RosterFilter) -> impl Iterator<Item = &'a Athlete> {
        self.athletes.iter().filter(move |a| filter.matches(a))
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.athletes
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| RosterError::AthleteNotFound(id.to_string()))
    }
}

/// Filter criteria for listing athletes
#[derive(Debug, Default)]
pub struct RosterFilter {
    pub gender: Option<Gender>,
    pub tier: Option<Tier>,
    pub event_group: Option<EventGroup>,
    pub include_archived: bool,
}

impl RosterFilter {
    pub fn matches(&self, athlete: &Athlete) -> bool {
        if !self.include_archived && !athlete.is_active() {
            return false;
        }

        if let Some(gender) = self.gender {
            if athlete.gender != gender {
                return false;
            }
        }

        if let Some(tier) = self.tier {
            if athlete.tier != tier {
                return false;
            }
        }

        if let Some(group) = self.event_group {
            if athlete.event_group != group {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn athlete(name: &str, gender: Gender, tier: Tier) -> Athlete {
        Athlete::new(
            name.to_string(),
            gender,
            EventGroup::Distance,
            tier,
            3.0,
            5_000.0,
            2026,
        )
    }

    fn sample_roster() -> Roster {
        Roster::from_athletes(vec![
            athlete("Jonah Reyes", Gender::Men, Tier::Elite),
            athlete("Priya Shah", Gender::Women, Tier::Developing),
            athlete("Sam Lee", Gender::Men, Tier::Prospect),
            athlete("Sam Lee", Gender::Women, Tier::Prospect),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut roster = sample_roster();
        let duplicate = roster.athletes()[0].clone();

        let result = roster.add(duplicate);
        assert!(matches!(result, Err(RosterError::DuplicateAthlete(_))));
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut roster = Roster::new();
        let mut bad = athlete("Bad Gpa", Gender::Men, Tier::Elite);
        bad.gpa = 5.0;

        assert!(roster.add(bad).is_err());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_find_by_id_and_name() {
        let roster = sample_roster();
        let id = roster.athletes()[1].id.clone();

        assert_eq!(roster.find(&id).unwrap().name, "Priya Shah");
        assert_eq!(roster.find("priya shah").unwrap().id, id);
        assert!(matches!(
            roster.find("sam lee"),
            Err(RosterError::AmbiguousAthlete { matches: 2, .. })
        ));
        assert!(matches!(
            roster.find("nobody"),
            Err(RosterError::AthleteNotFound(_))
        ));
    }

    #[test]
    fn test_update_is_atomic() {
        let mut roster = sample_roster();
        let id = roster.athletes()[0].id.clone();

        let result = roster.update(
            &id,
            AthleteUpdate {
                tier: Some(Tier::Developing),
                gpa: Some(9.0),
                ..Default::default()
            },
        );

        assert!(result.is_err());
        assert_eq!(roster.get(&id).unwrap().tier, Tier::Elite);
    }

    #[test]
    fn test_archive_restore_remove() {
        let mut roster = sample_roster();
        let id = roster.athletes()[2].id.clone();

        roster.archive(&id).unwrap();
        assert_eq!(roster.active().count(), 3);

        roster.restore(&id).unwrap();
        assert_eq!(roster.active().count(), 4);

        let removed = roster.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(roster.len(), 3);
        assert!(roster.remove(&id).is_err());
    }

    #[test]
    fn test_filter() {
        let mut roster = sample_roster();
        let id = roster.athletes()[0].id.clone();
        roster.archive(&id).unwrap();

        let men = RosterFilter {
            gender: Some(Gender::Men),
            ..Default::default()
        };
        assert_eq!(roster.filter(&men).count(), 1);

        let all_men = RosterFilter {
            gender: Some(Gender::Men),
            include_archived: true,
            ..Default::default()
        };
        assert_eq!(roster.filter(&all_men).count(), 2);

        let prospects = RosterFilter {
            tier: Some(Tier::Prospect),
            event_group: Some(EventGroup::Distance),
            ..Default::default()
        };
        assert_eq!(roster.filter(&prospects).count(), 2);
    }
}
