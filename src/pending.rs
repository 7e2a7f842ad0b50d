use crate::models::{ChecklistEntry, Operator};

/// Roster members with no row in `todays`, in roster order.
pub fn pending_operators(todays: &[ChecklistEntry]) -> Vec<Operator> {
    Operator::ROSTER
        .into_iter()
        .filter(|op| !todays.iter().any(|entry| entry.operator == *op))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Status};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::BTreeSet;

    fn entry(operator: Operator) -> ChecklistEntry {
        ChecklistEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            operator,
            activity: Activity::StockControl,
            status: Status::Completed,
            note: String::new(),
        }
    }

    #[test]
    fn only_ana_submitted() {
        let pending = pending_operators(&[entry(Operator::Ana)]);
        assert_eq!(
            pending,
            vec![
                Operator::Mateus,
                Operator::Joao,
                Operator::Maria,
                Operator::Carlos
            ]
        );
    }

    #[test]
    fn everyone_pending_on_empty_day() {
        assert_eq!(pending_operators(&[]), Operator::ROSTER.to_vec());
    }

    #[test]
    fn all_submitted_is_empty() {
        let todays: Vec<_> = Operator::ROSTER.into_iter().rev().map(entry).collect();
        assert!(pending_operators(&todays).is_empty());
    }

    #[test]
    fn pending_and_submitted_cover_roster() {
        let picks = [
            vec![Operator::Maria],
            vec![Operator::Carlos, Operator::Carlos, Operator::Mateus],
            vec![Operator::Joao, Operator::Ana, Operator::Maria],
        ];
        for pick in picks {
            let todays: Vec<_> = pick.iter().copied().map(entry).collect();
            let mut union: BTreeSet<Operator> = pending_operators(&todays).into_iter().collect();
            union.extend(todays.iter().map(|e| e.operator));
            let roster: BTreeSet<Operator> = Operator::ROSTER.into_iter().collect();
            assert_eq!(union, roster);
        }
    }
}
