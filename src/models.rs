use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Warehouse workers allowed to log a checklist, in roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Mateus,
    Joao,
    Maria,
    Carlos,
    Ana,
}

impl Operator {
    pub const ROSTER: [Operator; 5] = [
        Operator::Mateus,
        Operator::Joao,
        Operator::Maria,
        Operator::Carlos,
        Operator::Ana,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Mateus => "Mateus",
            Operator::Joao => "João",
            Operator::Maria => "Maria",
            Operator::Carlos => "Carlos",
            Operator::Ana => "Ana",
        }
    }
}

/// Tasks that can be ticked off on the daily checklist, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Activity {
    PickGoods,
    IssueInvoice,
    StoreGoods,
    StockControl,
    Receiving,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::PickGoods,
        Activity::IssueInvoice,
        Activity::StoreGoods,
        Activity::StockControl,
        Activity::Receiving,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Activity::PickGoods => "Separar mercadorias",
            Activity::IssueInvoice => "Emitir Nota Fiscal",
            Activity::StoreGoods => "Guardar mercadorias no estoque",
            Activity::StockControl => "Controle de estoque",
            Activity::Receiving => "Recebimento",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Completed,
}

impl Status {
    pub fn name(self) -> &'static str {
        match self {
            Status::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl FromStr for Operator {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Operator::ROSTER
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl FromStr for Activity {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Activity::ALL
            .into_iter()
            .find(|act| act.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl FromStr for Status {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Concluído" is what the legacy Portuguese store wrote.
        match s.trim() {
            "Completed" | "Concluído" => Ok(Status::Completed),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

macro_rules! named_serde {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse()
                    .map_err(|_| serde::de::Error::custom(format!("unknown {}: {raw:?}", $what)))
            }
        }
    };
}

named_serde!(Operator, "operator");
named_serde!(Activity, "activity");
named_serde!(Status, "status");

/// One persisted row: a single completed activity from one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    #[serde(rename = "Date", alias = "Data")]
    pub date: NaiveDate,
    #[serde(rename = "Time", alias = "Hora", with = "clock_time")]
    pub time: NaiveTime,
    #[serde(rename = "Operator", alias = "Operador")]
    pub operator: Operator,
    #[serde(rename = "Activity", alias = "Atividade")]
    pub activity: Activity,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Note", alias = "Observação", default)]
    pub note: String,
}

/// `HH:MM:SS`, no fractional seconds.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub note: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    pub entries: Vec<ChecklistEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub entries: Vec<ChecklistEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingResponse {
    pub date: NaiveDate,
    pub all_submitted: bool,
    pub pending: Vec<Operator>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterResponse {
    pub operators: Vec<Operator>,
    pub activities: Vec<Activity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back_to_variants() {
        for op in Operator::ROSTER {
            assert_eq!(op.name().parse::<Operator>(), Ok(op));
        }
        for act in Activity::ALL {
            assert_eq!(act.name().parse::<Activity>(), Ok(act));
        }
        assert_eq!("  João ".parse::<Operator>(), Ok(Operator::Joao));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "Pedro".parse::<Operator>(),
            Err(UnknownName("Pedro".to_string()))
        );
        assert!("Varrer".parse::<Activity>().is_err());
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn legacy_status_is_accepted() {
        assert_eq!("Concluído".parse::<Status>(), Ok(Status::Completed));
        assert!("Pendente".parse::<Status>().is_err());
    }

    #[test]
    fn submit_request_fields_are_optional() {
        let request: SubmitRequest = serde_json::from_str("{}").unwrap();
        assert!(request.operator.is_empty());
        assert!(request.activities.is_empty());
        assert!(request.note.is_empty());
        assert!(request.date.is_none());
    }

    #[test]
    fn entry_serializes_with_display_names() {
        let entry = ChecklistEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time: NaiveTime::from_hms_opt(9, 5, 7).unwrap(),
            operator: Operator::Joao,
            activity: Activity::IssueInvoice,
            status: Status::Completed,
            note: String::new(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Date"], "2026-03-02");
        assert_eq!(json["Time"], "09:05:07");
        assert_eq!(json["Operator"], "João");
        assert_eq!(json["Activity"], "Emitir Nota Fiscal");
        assert_eq!(json["Status"], "Completed");
    }
}
