#![allow(dead_code)]

use santa_assign::ParticipantSet;
use santa_core::{Contact, ParticipantId};

pub fn roster(names: &[&str]) -> ParticipantSet {
    let mut set = ParticipantSet::new();
    for name in names {
        set.insert(*name, Contact::new(format!("{name}@example.com"), None)).unwrap();
    }
    set
}

pub fn numbered_roster(n: usize) -> ParticipantSet {
    let names: Vec<String> = (0..n).map(|idx| format!("p{idx:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    roster(&refs)
}

pub fn id(name: &str) -> ParticipantId {
    ParticipantId::from(name)
}

pub fn targets(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|name| id(name)).collect()
}

pub fn assignment_of(set: &ParticipantSet) -> Vec<(String, Vec<String>)> {
    set.iter()
        .map(|p| {
            (
                p.id().to_string(),
                p.assigned_to().iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}
