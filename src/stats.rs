use crate::models::{Activity, ChecklistEntry, Operator};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorCount {
    pub operator: Operator,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub activity: Activity,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    Honorable,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Medal::Gold,
            2 => Medal::Silver,
            3 => Medal::Bronze,
            _ => Medal::Honorable,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
            Medal::Honorable => "🎖️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub medal: Medal,
    pub operator: Operator,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_entries: usize,
    pub operators_submitted: usize,
    pub by_operator: Vec<OperatorCount>,
    pub by_activity: Vec<ActivityCount>,
    pub by_hour: Vec<HourCount>,
    pub ranking: Vec<RankingEntry>,
}

pub fn aggregate(todays: &[ChecklistEntry]) -> Summary {
    let by_operator = count_by_operator(todays);
    let ranking = rank(&by_operator);
    Summary {
        total_entries: todays.len(),
        operators_submitted: by_operator.len(),
        by_activity: count_by_activity(todays),
        by_hour: count_by_hour(todays),
        by_operator,
        ranking,
    }
}

/// Rows per operator, most first; equal counts keep first-seen order.
pub fn count_by_operator(entries: &[ChecklistEntry]) -> Vec<OperatorCount> {
    count_first_seen(entries.iter().map(|entry| entry.operator))
        .into_iter()
        .map(|(operator, count)| OperatorCount { operator, count })
        .collect()
}

/// Rows per activity, most first; equal counts keep first-seen order.
pub fn count_by_activity(entries: &[ChecklistEntry]) -> Vec<ActivityCount> {
    count_first_seen(entries.iter().map(|entry| entry.activity))
        .into_iter()
        .map(|(activity, count)| ActivityCount { activity, count })
        .collect()
}

/// Rows per hour of day, in chronological order.
pub fn count_by_hour(entries: &[ChecklistEntry]) -> Vec<HourCount> {
    let mut hours: BTreeMap<u32, u64> = BTreeMap::new();
    for entry in entries {
        *hours.entry(entry.time.hour()).or_default() += 1;
    }
    hours
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

/// Expects `counts` already sorted by `count_by_operator`.
pub fn rank(counts: &[OperatorCount]) -> Vec<RankingEntry> {
    counts
        .iter()
        .enumerate()
        .map(|(idx, item)| RankingEntry {
            rank: idx + 1,
            medal: Medal::for_rank(idx + 1),
            operator: item.operator,
            count: item.count,
        })
        .collect()
}

fn count_first_seen<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, u64)> {
    let mut counts: Vec<(K, u64)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(seen, _)| *seen == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use chrono::{NaiveDate, NaiveTime};

    fn entry(operator: Operator, activity: Activity, hour: u32) -> ChecklistEntry {
        ChecklistEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 15, 0).unwrap(),
            operator,
            activity,
            status: Status::Completed,
            note: String::new(),
        }
    }

    #[test]
    fn ana_ranks_above_joao() {
        let todays = vec![
            entry(Operator::Ana, Activity::Receiving, 8),
            entry(Operator::Ana, Activity::IssueInvoice, 8),
            entry(Operator::Joao, Activity::Receiving, 9),
        ];
        let summary = aggregate(&todays);

        assert_eq!(
            summary.by_operator,
            vec![
                OperatorCount { operator: Operator::Ana, count: 2 },
                OperatorCount { operator: Operator::Joao, count: 1 },
            ]
        );
        assert_eq!(summary.ranking.len(), 2);
        assert_eq!(summary.ranking[0].rank, 1);
        assert_eq!(summary.ranking[0].operator, Operator::Ana);
        assert_eq!(summary.ranking[0].medal, Medal::Gold);
        assert_eq!(summary.ranking[1].operator, Operator::Joao);
        assert_eq!(summary.ranking[1].medal, Medal::Silver);
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.operators_submitted, 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let todays = vec![
            entry(Operator::Carlos, Activity::StoreGoods, 7),
            entry(Operator::Mateus, Activity::PickGoods, 7),
            entry(Operator::Maria, Activity::PickGoods, 7),
            entry(Operator::Maria, Activity::StoreGoods, 7),
        ];
        let by_operator = count_by_operator(&todays);
        let order: Vec<_> = by_operator.iter().map(|c| c.operator).collect();
        assert_eq!(order, vec![Operator::Maria, Operator::Carlos, Operator::Mateus]);

        let by_activity = count_by_activity(&todays);
        let order: Vec<_> = by_activity.iter().map(|c| c.activity).collect();
        assert_eq!(order, vec![Activity::StoreGoods, Activity::PickGoods]);
    }

    #[test]
    fn activities_sorted_by_count() {
        let todays = vec![
            entry(Operator::Ana, Activity::StockControl, 10),
            entry(Operator::Ana, Activity::Receiving, 10),
            entry(Operator::Joao, Activity::Receiving, 10),
            entry(Operator::Maria, Activity::Receiving, 11),
        ];
        let by_activity = count_by_activity(&todays);
        assert_eq!(
            by_activity,
            vec![
                ActivityCount { activity: Activity::Receiving, count: 3 },
                ActivityCount { activity: Activity::StockControl, count: 1 },
            ]
        );
    }

    #[test]
    fn hours_are_chronological() {
        let todays = vec![
            entry(Operator::Ana, Activity::Receiving, 16),
            entry(Operator::Ana, Activity::Receiving, 7),
            entry(Operator::Joao, Activity::Receiving, 16),
            entry(Operator::Maria, Activity::Receiving, 0),
        ];
        assert_eq!(
            count_by_hour(&todays),
            vec![
                HourCount { hour: 0, count: 1 },
                HourCount { hour: 7, count: 1 },
                HourCount { hour: 16, count: 2 },
            ]
        );
    }

    #[test]
    fn medals_past_third_place_are_shared() {
        let todays: Vec<_> = Operator::ROSTER
            .into_iter()
            .map(|op| entry(op, Activity::Receiving, 9))
            .collect();
        let medals: Vec<_> = aggregate(&todays).ranking.iter().map(|r| r.medal).collect();
        assert_eq!(
            medals,
            vec![
                Medal::Gold,
                Medal::Silver,
                Medal::Bronze,
                Medal::Honorable,
                Medal::Honorable
            ]
        );
    }

    #[test]
    fn empty_day_is_empty_summary() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_entries, 0);
        assert!(summary.by_operator.is_empty());
        assert!(summary.by_activity.is_empty());
        assert!(summary.by_hour.is_empty());
        assert!(summary.ranking.is_empty());
    }
}
