use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ParticipantId = String;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Result of resolving an id against the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantRef<'a> {
    Known(&'a Participant),
    Unknown(&'a str),
}

/// Participants of one computation, in caller order, indexed by id.
///
/// Identity is by id only. When an id is supplied twice the first entry wins and
/// the later ones are reported through [`Roster::duplicates`].
#[derive(Debug)]
pub struct Roster<'a> {
    members: Vec<&'a Participant>,
    index: HashMap<&'a str, usize>,
    duplicates: Vec<&'a str>,
}

impl<'a> Roster<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        let mut members = Vec::with_capacity(participants.len());
        let mut index = HashMap::with_capacity(participants.len());
        let mut duplicates = Vec::new();

        for participant in participants {
            if index.contains_key(participant.id.as_str()) {
                duplicates.push(participant.id.as_str());
                continue;
            }
            index.insert(participant.id.as_str(), members.len());
            members.push(participant);
        }

        Roster {
            members,
            index,
            duplicates,
        }
    }

    pub fn resolve<'b>(&self, id: &'b str) -> ParticipantRef<'b>
    where
        'a: 'b,
    {
        match self.index.get(id) {
            Some(&pos) => ParticipantRef::Known(self.members[pos]),
            None => ParticipantRef::Unknown(id),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&'a Participant> {
        self.index.get(id).map(|&pos| self.members[pos])
    }

    pub fn members(&self) -> impl Iterator<Item = &'a Participant> + '_ {
        self.members.iter().copied()
    }

    pub fn duplicates(&self) -> &[&'a str] {
        &self.duplicates
    }
}
