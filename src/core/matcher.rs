//! Randomized assignment of givers to targets.
//!
//! Each attempt walks the participants in source order and draws a target
//! uniformly from what is left of the pool, discarding illegal draws without
//! replacement. A dead end throws the whole attempt away and starts over from
//! the untouched inputs. Feasibility is checked before any randomness is used,
//! so the restart loop only runs on inputs that have at least one solution.
//! Once the attempt budget runs out, a randomized augmenting-path matching
//! over the same legal lists finishes the draw.

use crate::domain::model::{Assignment, Participant, Target};
use crate::utils::error::{Result, SantaError};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// 單次嘗試走入死路，只在本模組內部使用
#[derive(Debug)]
struct Exhausted;

#[derive(Debug, Clone)]
pub struct Matcher {
    max_attempts: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Matcher {
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn assign<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        pool: &[Target],
        rng: &mut R,
    ) -> Result<Vec<Assignment>> {
        let legal = legal_targets(participants, pool)?;

        for attempt in 1..=self.max_attempts {
            match attempt_assignment(participants, pool, rng) {
                Ok(assignments) => {
                    tracing::debug!("Assignment found after {} attempt(s)", attempt);
                    return Ok(assignments);
                }
                Err(Exhausted) => {
                    tracing::debug!("Attempt {} hit a dead end, restarting", attempt);
                }
            }
        }

        tracing::debug!(
            "No assignment after {} attempt(s), building one by augmenting paths",
            self.max_attempts
        );
        randomized_matching(participants, pool, legal, rng)
    }
}

/// 以預設嘗試上限進行分配
pub fn assign<R: Rng + ?Sized>(
    participants: &[Participant],
    pool: &[Target],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    Matcher::default().assign(participants, pool, rng)
}

/// 每位送禮者可合法抽到的目標索引；無完整配對時回傳錯誤
/// Never touches the random source.
fn legal_targets(participants: &[Participant], pool: &[Target]) -> Result<Vec<Vec<usize>>> {
    if participants.len() < 2 {
        return Err(SantaError::NotEnoughParticipants {
            found: participants.len(),
        });
    }

    if pool.len() != participants.len() {
        return Err(SantaError::PoolSizeMismatch {
            participants: participants.len(),
            targets: pool.len(),
        });
    }

    let legal: Vec<Vec<usize>> = participants
        .iter()
        .map(|giver| {
            pool.iter()
                .enumerate()
                .filter(|(_, target)| target.is_legal_for(giver))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    if let Some((giver, _)) = participants
        .iter()
        .zip(&legal)
        .find(|(_, options)| options.is_empty())
    {
        return Err(SantaError::InfeasibleAssignment {
            participant: giver.name().to_string(),
        });
    }

    if complete_matching(&legal, pool.len()).is_none() {
        return Err(SantaError::NoCompleteAssignment);
    }

    Ok(legal)
}

fn randomized_matching<R: Rng + ?Sized>(
    participants: &[Participant],
    pool: &[Target],
    mut legal: Vec<Vec<usize>>,
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    for options in &mut legal {
        options.shuffle(rng);
    }

    let chosen = complete_matching(&legal, pool.len()).ok_or(SantaError::NoCompleteAssignment)?;

    Ok(participants
        .iter()
        .zip(chosen)
        .map(|(giver, target)| Assignment {
            giver: giver.clone(),
            target: pool[target].clone(),
        })
        .collect())
}

fn attempt_assignment<R: Rng + ?Sized>(
    participants: &[Participant],
    pool: &[Target],
    rng: &mut R,
) -> std::result::Result<Vec<Assignment>, Exhausted> {
    let mut remaining: Vec<&Target> = pool.iter().collect();
    let mut assignments = Vec::with_capacity(participants.len());

    for giver in participants {
        let index = choose_target(giver, &remaining, rng)?;
        let target = remaining.remove(index);
        assignments.push(Assignment {
            giver: giver.clone(),
            target: target.clone(),
        });
    }

    Ok(assignments)
}

fn choose_target<R: Rng + ?Sized>(
    giver: &Participant,
    remaining: &[&Target],
    rng: &mut R,
) -> std::result::Result<usize, Exhausted> {
    let mut candidates: Vec<usize> = (0..remaining.len()).collect();

    while !candidates.is_empty() {
        let drawn = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        if remaining[drawn].is_legal_for(giver) {
            return Ok(drawn);
        }
    }

    Err(Exhausted)
}

// Kuhn's augmenting path matching over the legal-target lists.
// Returns the chosen target index for each giver.
fn complete_matching(legal: &[Vec<usize>], targets: usize) -> Option<Vec<usize>> {
    let mut owner: Vec<Option<usize>> = vec![None; targets];

    for giver in 0..legal.len() {
        let mut visited = vec![false; targets];
        if !augment(giver, legal, &mut owner, &mut visited) {
            return None;
        }
    }

    let mut chosen = vec![0; legal.len()];
    for (target, giver) in owner.iter().enumerate() {
        if let Some(giver) = giver {
            chosen[*giver] = target;
        }
    }
    Some(chosen)
}

fn augment(
    giver: usize,
    legal: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &target in &legal[giver] {
        if visited[target] {
            continue;
        }
        visited[target] = true;

        let free = match owner[target] {
            None => true,
            Some(other) => augment(other, legal, owner, visited),
        };
        if free {
            owner[target] = Some(giver);
            return true;
        }
    }
    false
}
