//! Player trades and draft pick transfers
//!
//! A player trade never rewrites ownership or identity columns. Instead the
//! two roster rows exchange everything else, so each team's slot keeps its
//! ids while the player data moves. Draft picks have no identity fields and
//! are transferred by rewriting the owning team outright.

use crate::catalog::{columns, Catalog};
use crate::error::{Error, Result};
use crate::record::{Record, RecordSet};
use crate::schema::SchemaMetadata;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Exchange every shared, non-immutable field between two records.
///
/// Keys present in only one record are left alone in both. Returns the
/// number of fields exchanged.
pub fn swap_fields(a: &mut Record, b: &mut Record, immutable: &BTreeSet<String>) -> usize {
    // (slot in a, slot in b); a repeated key pairs with the same repeat in b
    let slots: Vec<(usize, usize)> = {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        a.keys()
            .enumerate()
            .filter_map(|(ia, key)| {
                let n = seen.entry(key).or_insert(0);
                let occurrence = *n;
                *n += 1;
                if immutable.contains(key) {
                    return None;
                }
                b.position(key, occurrence).map(|ib| (ia, ib))
            })
            .collect()
    };

    let mut swapped = 0;
    for (ia, ib) in slots {
        if let (Some(va), Some(vb)) = (a.value_at_mut(ia), b.value_at_mut(ib)) {
            std::mem::swap(va, vb);
            swapped += 1;
        }
    }
    swapped
}

/// Swap two rows of a record set, leaving `immutable` columns in place.
///
/// Fails without touching either row when `a == b`.
pub fn safe_swap(
    set: &mut RecordSet,
    a: usize,
    b: usize,
    immutable: &BTreeSet<String>,
) -> Result<usize> {
    if a == b {
        return Err(Error::InvariantViolation(
            "cannot swap a record with itself".to_string(),
        ));
    }
    let (ra, rb) = set.pair_mut(a, b)?;
    let swapped = swap_fields(ra, rb, immutable);
    info!(a, b, fields = swapped, "swapped records");
    Ok(swapped)
}

/// Hand a draft pick to another team
pub fn reassign_draft_pick(pick: &mut Record, new_owner: &str) -> Result<()> {
    pick.set(columns::PICK_TEAM, new_owner)?;
    Ok(())
}

/// Indexes of the picks owned by a team, in file order
pub fn picks_for_team(picks: &RecordSet, team_id: &str) -> Vec<usize> {
    picks
        .records
        .iter()
        .enumerate()
        .filter(|(_, p)| p.get_trimmed(columns::PICK_TEAM) == team_id)
        .map(|(i, _)| i)
        .collect()
}

/// Move picks from one team to another.
///
/// `indexes` refer to positions within the from-team's picks; values out of
/// range are skipped. Returns the record indexes that changed hands.
pub fn acquire_picks(
    picks: &mut RecordSet,
    from_team: &str,
    to_team: &str,
    indexes: &[usize],
) -> Result<Vec<usize>> {
    let owned = picks_for_team(picks, from_team);
    if owned.is_empty() {
        return Err(Error::Validation(format!(
            "no picks found for team '{from_team}'"
        )));
    }

    let selected: BTreeSet<usize> = indexes
        .iter()
        .filter_map(|&i| owned.get(i).copied())
        .collect();
    if selected.is_empty() {
        return Err(Error::Validation("no valid pick indexes".to_string()));
    }

    for &row in &selected {
        reassign_draft_pick(picks.get_mut(row)?, to_team)?;
    }
    info!(from = from_team, to = to_team, count = selected.len(), "moved draft picks");
    Ok(selected.into_iter().collect())
}

/// Result of a direct team move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: String, to: String },
    AlreadyOnTeam,
}

/// Rewrite a player's team column.
///
/// Only allowed when the detected team column is not the locked identifier;
/// otherwise callers must use [`safe_swap`].
pub fn move_player(
    players: &mut RecordSet,
    index: usize,
    team_id: &str,
    schema: &SchemaMetadata,
    catalog: &Catalog,
) -> Result<MoveOutcome> {
    let team_column = match &schema.team_column {
        None => return Err(Error::MoveDisabled("no team column detected".to_string())),
        Some(_) if !schema.can_move_players(catalog) => {
            return Err(Error::MoveDisabled(format!(
                "'{}' is the only team column; use a swap trade instead",
                catalog.locked_team_column()
            )))
        }
        Some(col) => col.as_str(),
    };

    let player = players.get_mut(index)?;
    let current = player.get_trimmed(team_column).to_string();
    if current == team_id {
        return Ok(MoveOutcome::AlreadyOnTeam);
    }

    player.set(team_column, team_id)?;
    info!(player = index, from = %current, to = team_id, "moved player");
    Ok(MoveOutcome::Moved {
        from: current,
        to: team_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::load_str;

    fn immutable() -> BTreeSet<String> {
        ["TGID", "PGID"].iter().map(|s| s.to_string()).collect()
    }

    fn tom() -> Record {
        Record::from_pairs([
            ("TGID", "1"),
            ("PGID", "100"),
            ("PFNA", "Tom"),
            ("PLNA", "Brady"),
            ("PSPD", "85"),
        ])
    }

    fn drew() -> Record {
        Record::from_pairs([
            ("TGID", "2"),
            ("PGID", "200"),
            ("PFNA", "Drew"),
            ("PLNA", "Bledsoe"),
            ("PSPD", "80"),
        ])
    }

    #[test]
    fn test_safe_swap_example() {
        let mut set = RecordSet::new();
        set.records = vec![tom(), drew()];

        let swapped = safe_swap(&mut set, 0, 1, &immutable()).unwrap();
        assert_eq!(swapped, 3);

        let a = &set.records[0];
        assert_eq!(a.get("TGID"), Some("1"));
        assert_eq!(a.get("PGID"), Some("100"));
        assert_eq!(a.get("PFNA"), Some("Drew"));
        assert_eq!(a.get("PLNA"), Some("Bledsoe"));
        assert_eq!(a.get("PSPD"), Some("80"));

        let b = &set.records[1];
        assert_eq!(b.get("TGID"), Some("2"));
        assert_eq!(b.get("PGID"), Some("200"));
        assert_eq!(b.get("PFNA"), Some("Tom"));
        assert_eq!(b.get("PLNA"), Some("Brady"));
        assert_eq!(b.get("PSPD"), Some("85"));
    }

    #[test]
    fn test_swap_self_rejected() {
        let mut set = RecordSet::new();
        set.records = vec![tom()];
        let err = safe_swap(&mut set, 0, 0, &immutable()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert_eq!(set.records[0], tom());
    }

    #[test]
    fn test_swap_partial_key_overlap() {
        let mut a = Record::from_pairs([("PGID", "1"), ("PFNA", "A"), ("ONLYA", "x")]);
        let mut b = Record::from_pairs([("PGID", "2"), ("PFNA", "B"), ("ONLYB", "y")]);

        assert_eq!(swap_fields(&mut a, &mut b, &immutable()), 1);
        assert_eq!(a.get("PFNA"), Some("B"));
        assert_eq!(b.get("PFNA"), Some("A"));
        assert_eq!(a.get("ONLYA"), Some("x"));
        assert_eq!(b.get("ONLYB"), Some("y"));
        assert_eq!(a.get("PGID"), Some("1"));
    }

    #[test]
    fn test_swap_repeated_columns() {
        let mut set = load_str(
            "PGID,PFNA,PFNA\n100,Tom,T2\n200,Drew,D2\n",
            "play.csv",
        )
        .unwrap();

        assert_eq!(safe_swap(&mut set, 0, 1, &immutable()).unwrap(), 2);
        let (a, b) = (&set.records[0], &set.records[1]);
        assert_eq!(a.get_nth("PFNA", 0), Some("Drew"));
        assert_eq!(a.get_nth("PFNA", 1), Some("D2"));
        assert_eq!(b.get_nth("PFNA", 0), Some("Tom"));
        assert_eq!(b.get_nth("PFNA", 1), Some("T2"));
        assert_eq!(a.get("PGID"), Some("100"));
    }

    #[test]
    fn test_acquire_picks() {
        let mut picks = load_str(
            "DPID,DPNM,DPYO\n5,0,0\n7,1,0\n5,2,1\n5,3,1\n",
            "drpk.csv",
        )
        .unwrap();

        let moved = acquire_picks(&mut picks, "5", "9", &[2, 0, 8]).unwrap();
        assert_eq!(moved, vec![0, 3]);
        assert_eq!(picks.records[0].get("DPID"), Some("9"));
        assert_eq!(picks.records[2].get("DPID"), Some("5"));
        assert_eq!(picks.records[3].get("DPID"), Some("9"));

        assert!(acquire_picks(&mut picks, "42", "9", &[0]).is_err());
        assert!(acquire_picks(&mut picks, "5", "9", &[7]).is_err());
    }

    #[test]
    fn test_reassign_requires_owner_column() {
        let mut pick = Record::from_pairs([("DPNM", "3")]);
        assert!(matches!(
            reassign_draft_pick(&mut pick, "4"),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_move_player_rules() {
        let catalog = Catalog::builtin();

        let mut locked = load_str("TGID,PGID\n1,10\n", "play.csv").unwrap();
        let schema = SchemaMetadata::from_headers(&locked.headers, &catalog);
        let err = move_player(&mut locked, 0, "2", &schema, &catalog).unwrap_err();
        assert!(matches!(err, Error::MoveDisabled(_)));
        assert_eq!(locked.records[0].get("TGID"), Some("1"));

        let mut open = load_str("TEAM,TGID,PGID\n1,1,10\n", "play.csv").unwrap();
        let schema = SchemaMetadata::from_headers(&open.headers, &catalog);
        let outcome = move_player(&mut open, 0, "2", &schema, &catalog).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: "1".to_string(),
                to: "2".to_string()
            }
        );
        assert_eq!(open.records[0].get("TEAM"), Some("2"));
        assert_eq!(open.records[0].get("TGID"), Some("1"));

        let outcome = move_player(&mut open, 0, "2", &schema, &catalog).unwrap();
        assert_eq!(outcome, MoveOutcome::AlreadyOnTeam);
    }
}
