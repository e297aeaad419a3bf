//! Family forest builder.
//!
//! Players form a multi-parent DAG (a child may list several parents). The
//! forest is built over an arena of indices keyed by player id, never through
//! mutually-referential nodes, and the DAG is rendered as a tree by
//! duplicating a multi-parent player under each of its parents.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use time::Date;

use crate::domain::models::Player;

/// Sentinel id for the synthetic invisible root wrapping a multi-root forest.
pub const SYNTHETIC_ROOT_ID: i64 = -1;

/// A rendered ancestry node. Multi-parent players are duplicated, so the same
/// player may appear in several subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub player: Player,
    pub children: Vec<TreeNode>,
}

/// Renderer-agnostic tree shape for single-root tree widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub label: String,
    pub attributes: RenderAttributes,
    pub children: Vec<RenderTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderAttributes {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub age: Option<i32>,
    /// Marks the synthetic wrapper root as non-interactive.
    pub invisible: bool,
}

/// Index arena over a flat player list: adjacency by position, no owned links.
struct Arena<'a> {
    players: &'a [Player],
    index_of: HashMap<i64, usize>,
    /// Child indices per player index, sorted oldest first.
    children: Vec<Vec<usize>>,
    /// Root indices (players whose declared parents all dangle or are absent),
    /// sorted oldest first.
    roots: Vec<usize>,
}

impl<'a> Arena<'a> {
    fn build(players: &'a [Player]) -> Self {
        let index_of: HashMap<i64, usize> = players
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id, idx))
            .collect();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); players.len()];
        let mut roots = Vec::new();

        for (idx, player) in players.iter().enumerate() {
            // Dangling parent ids are skipped; the player is a root only if
            // every declared parent dangles.
            let mut linked = false;
            for parent_id in &player.parent_ids {
                if let Some(&parent_idx) = index_of.get(parent_id) {
                    if !children[parent_idx].contains(&idx) {
                        children[parent_idx].push(idx);
                    }
                    linked = true;
                }
            }
            if !linked {
                roots.push(idx);
            }
        }

        // Oldest first; unknown birthdates sort last. The sort is stable, so
        // equally-unknown siblings keep their input order.
        for list in &mut children {
            list.sort_by(|&a, &b| birthdate_order(&players[a], &players[b]));
        }
        roots.sort_by(|&a, &b| birthdate_order(&players[a], &players[b]));

        Self {
            players,
            index_of,
            children,
            roots,
        }
    }

    fn materialize(&self, idx: usize, keep: Option<&HashSet<usize>>) -> TreeNode {
        let children = self.children[idx]
            .iter()
            .filter(|&&child| keep.map_or(true, |k| k.contains(&child)))
            .map(|&child| self.materialize(child, keep))
            .collect();
        TreeNode {
            player: self.players[idx].clone(),
            children,
        }
    }

    /// Closure of a match set: every ancestor and every descendant of each
    /// matched player.
    fn closure(&self, matches: &[usize]) -> HashSet<usize> {
        let mut relevant = HashSet::new();
        for &idx in matches {
            self.expand(idx, &mut relevant);
        }
        relevant
    }

    fn expand(&self, idx: usize, relevant: &mut HashSet<usize>) {
        if !relevant.insert(idx) {
            return;
        }
        for parent_id in &self.players[idx].parent_ids {
            if let Some(&parent_idx) = self.index_of.get(parent_id) {
                self.expand(parent_idx, relevant);
            }
        }
        for &child_idx in &self.children[idx] {
            self.expand(child_idx, relevant);
        }
    }
}

/// Build the ancestry forest from a flat player list.
///
/// With a non-empty `search_term`, the forest is pruned to players whose
/// alias, first name, or last name contains the term (case-insensitive),
/// together with all their ancestors and descendants; no match yields an
/// empty forest. Without a search term, `visible_ids` caps the forest to the
/// given root ids (children still fully expanded); `None` returns everything.
pub fn build_forest(
    players: &[Player],
    search_term: &str,
    visible_ids: Option<&HashSet<i64>>,
) -> Vec<TreeNode> {
    if players.is_empty() {
        return Vec::new();
    }

    let arena = Arena::build(players);

    if !search_term.is_empty() {
        let needle = search_term.to_lowercase();
        let matches: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| name_matches(p, &needle))
            .map(|(idx, _)| idx)
            .collect();
        if matches.is_empty() {
            return Vec::new();
        }
        let keep = arena.closure(&matches);
        return arena
            .roots
            .iter()
            .filter(|&&idx| keep.contains(&idx))
            .map(|&idx| arena.materialize(idx, Some(&keep)))
            .collect();
    }

    arena
        .roots
        .iter()
        .filter(|&&idx| visible_ids.map_or(true, |ids| ids.contains(&players[idx].id)))
        .map(|&idx| arena.materialize(idx, None))
        .collect()
}

/// Convert a forest to the renderer-agnostic shape. A single tree converts
/// directly; several roots are wrapped under one synthetic invisible root so
/// single-root renderers can display a forest; an empty forest is `None`
/// rather than a synthetic node that could be mistaken for data.
pub fn to_render_tree(forest: &[TreeNode], today: Date) -> Option<RenderTree> {
    let mut converted: Vec<RenderTree> = forest.iter().map(|node| convert(node, today)).collect();
    match converted.len() {
        0 => None,
        1 => converted.pop(),
        _ => Some(RenderTree {
            label: String::new(),
            attributes: RenderAttributes {
                id: SYNTHETIC_ROOT_ID,
                first_name: String::new(),
                middle_name: String::new(),
                last_name: String::new(),
                birthdate: String::new(),
                age: None,
                invisible: true,
            },
            children: converted,
        }),
    }
}

/// Ids of the most recently active players, newest first: by last game date,
/// falling back to registration date, truncated to `limit`.
pub fn recent_player_ids(players: &[Player], limit: usize) -> Vec<i64> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.last_game_date.unwrap_or(p.registration_date)));
    sorted.into_iter().take(limit).map(|p| p.id).collect()
}

/// Whole years between `birthdate` and `today`.
pub fn age_on(birthdate: Date, today: Date) -> i32 {
    let mut age = today.year() - birthdate.year();
    if (today.month() as u8, today.day()) < (birthdate.month() as u8, birthdate.day()) {
        age -= 1;
    }
    age
}

fn birthdate_order(a: &Player, b: &Player) -> Ordering {
    match (a.birthdate, b.birthdate) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn name_matches(player: &Player, needle: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    };
    player.alias.to_lowercase().contains(needle)
        || contains(&player.first_name)
        || contains(&player.last_name)
}

fn convert(node: &TreeNode, today: Date) -> RenderTree {
    let p = &node.player;
    RenderTree {
        label: p.alias.clone(),
        attributes: RenderAttributes {
            id: p.id,
            first_name: p.first_name.clone().unwrap_or_default(),
            middle_name: p.middle_name.clone().unwrap_or_default(),
            last_name: p.last_name.clone().unwrap_or_default(),
            birthdate: p.birthdate.map(|d| d.to_string()).unwrap_or_default(),
            age: p.birthdate.map(|d| age_on(d, today)),
            invisible: false,
        },
        children: node.children.iter().map(|c| convert(c, today)).collect(),
    }
}
