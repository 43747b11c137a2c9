//! Who else is editing, and where their cursor is.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const COLORS: [&str; 7] = [
    "#FF5C5C", "#FFB65C", "#88FF70", "#47F0FF", "#478EFF", "#745CFF", "#FF85FF",
];

const ADJECTIVES: [&str; 26] = [
    "auspicious", "brave", "clever", "daring", "eager", "fearless", "gracious", "happy",
    "intelligent", "jolly", "kind", "lively", "mighty", "noble", "optimistic", "polite",
    "quick", "reliable", "strong", "trustworthy", "unique", "valiant", "witty", "xenial",
    "youthful", "zesty",
];

const ANIMALS: [&str; 26] = [
    "alligator", "bear", "cat", "dog", "elephant", "fox", "giraffe", "horse", "iguana",
    "jaguar", "kangaroo", "lion", "monkey", "narwhal", "owl", "penguin", "quetzal", "rabbit",
    "squirrel", "tiger", "urchin", "viper", "wombat", "xerus", "yak", "zebra",
];

pub type PeerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Vec<usize>>,
}

/// Awareness roster: the local peer plus every remote peer heard from.
#[derive(Debug, Clone)]
pub struct Presence {
    local: PeerId,
    states: BTreeMap<PeerId, Peer>,
}

impl Presence {
    pub fn new(local: PeerId, user: User) -> Self {
        let states = BTreeMap::from([(local, Peer { user, cursor: None })]);
        Self { local, states }
    }

    pub fn local_id(&self) -> PeerId {
        self.local
    }

    pub fn local(&self) -> Option<&Peer> {
        self.states.get(&self.local)
    }

    /// Remote peers, in id order.
    pub fn peers(&self) -> impl Iterator<Item = (PeerId, &Peer)> {
        self.states
            .iter()
            .filter(move |(id, _)| **id != self.local)
            .map(|(id, peer)| (*id, peer))
    }

    pub fn set_cursor(&mut self, cursor: Vec<usize>) {
        if let Some(peer) = self.states.get_mut(&self.local) {
            peer.cursor = Some(cursor);
        }
    }

    /// Records a remote peer's state, replacing the previous one.
    pub fn update(&mut self, id: PeerId, peer: Peer) {
        self.states.insert(id, peer);
    }

    pub fn remove(&mut self, id: PeerId) -> Option<Peer> {
        if id == self.local {
            return None;
        }
        self.states.remove(&id)
    }
}

fn choose(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

pub fn random_color() -> &'static str {
    choose(&COLORS)
}

/// An `adjective-animal` name.
pub fn random_username() -> String {
    format!("{}-{}", choose(&ADJECTIVES), choose(&ANIMALS))
}

pub fn random_user() -> User {
    User {
        name: random_username(),
        color: random_color().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peers_exclude_the_local_one() {
        let mut presence = Presence::new(1, random_user());
        presence.update(
            2,
            Peer {
                user: User {
                    name: "brave-owl".into(),
                    color: COLORS[0].into(),
                },
                cursor: Some(vec![0, 3]),
            },
        );
        let peers: Vec<_> = presence.peers().map(|(id, _)| id).collect();
        assert_eq!(peers, vec![2]);
        assert!(presence.remove(1).is_none());
        assert!(presence.remove(2).is_some());
        assert_eq!(presence.peers().count(), 0);
    }

    #[test]
    fn local_cursor_is_tracked() {
        let mut presence = Presence::new(7, random_user());
        presence.set_cursor(vec![1]);
        assert_eq!(presence.local().and_then(|p| p.cursor.clone()), Some(vec![1]));
    }

    #[test]
    fn random_names_come_from_the_word_lists() {
        let name = random_username();
        let (adjective, animal) = name.split_once('-').unwrap();
        assert!(ADJECTIVES.contains(&adjective));
        assert!(ANIMALS.contains(&animal));
        assert!(COLORS.contains(&random_color()));
    }
}
