use super::{Cents, Kind, Message};

/// Aggregated totals for a (possibly month-filtered) slice of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub balance: Cents,
    pub total_income: Cents,
    pub total_expense: Cents,
}

/// Restrict the log to one month partition, then drop everything up to and
/// including the most recent reset boundary within that partition.
///
/// The filter is applied before the reset scan, so a reset only truncates
/// the partition it was recorded in.
pub fn after_last_reset<'a>(
    messages: &'a [Message],
    month_filter: Option<&str>,
) -> Vec<&'a Message> {
    let scoped: Vec<&Message> = match month_filter {
        Some(month) => messages.iter().filter(|m| m.month == month).collect(),
        None => messages.iter().collect(),
    };

    let last_reset = scoped.iter().rposition(|m| m.kind == Kind::Reset);

    match last_reset {
        Some(idx) => scoped[idx + 1..].to_vec(),
        None => scoped,
    }
}

/// Fold the post-reset, month-filtered subsequence into totals.
/// Pure and deterministic: identical logs always yield identical totals.
pub fn compute_totals(messages: &[Message], month_filter: Option<&str>) -> Totals {
    after_last_reset(messages, month_filter)
        .into_iter()
        .fold(Totals::default(), |mut totals, msg| {
            match msg.kind {
                Kind::Income => {
                    totals.balance += msg.amount_cents;
                    totals.total_income += msg.amount_cents;
                }
                Kind::Expense => {
                    totals.balance -= msg.amount_cents;
                    totals.total_expense += msg.amount_cents;
                }
                Kind::AssistantReply | Kind::Reset | Kind::Unclassified => {}
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn msg_at(kind: Kind, amount: Cents, year: i32, month: u32) -> Message {
        let ts = Utc.with_ymd_and_hms(year, month, 10, 12, 0, 0).unwrap();
        Message::new("test", kind, amount, ts)
    }

    fn msg(kind: Kind, amount: Cents) -> Message {
        msg_at(kind, amount, 2025, 1)
    }

    #[test]
    fn test_totals_empty_log() {
        assert_eq!(compute_totals(&[], None), Totals::default());
    }

    #[test]
    fn test_totals_fold() {
        let log = vec![
            msg(Kind::Income, 350000),
            msg(Kind::Expense, 85000),
            msg(Kind::AssistantReply, 0),
            msg(Kind::Unclassified, 0),
        ];

        let totals = compute_totals(&log, None);
        assert_eq!(totals.balance, 265000);
        assert_eq!(totals.total_income, 350000);
        assert_eq!(totals.total_expense, 85000);
    }

    #[test]
    fn test_reset_truncates_scope() {
        let log = vec![
            msg(Kind::Income, 10000),
            msg(Kind::Expense, 3000),
            msg(Kind::Reset, 0),
            msg(Kind::Income, 5000),
        ];

        let totals = compute_totals(&log, Some("Janeiro 2025"));
        assert_eq!(totals.balance, 5000);
        assert_eq!(totals.total_income, 5000);
        assert_eq!(totals.total_expense, 0);
    }

    #[test]
    fn test_last_reset_wins() {
        let log = vec![
            msg(Kind::Income, 10000),
            msg(Kind::Reset, 0),
            msg(Kind::Income, 2000),
            msg(Kind::Reset, 0),
            msg(Kind::Income, 700),
        ];

        let totals = compute_totals(&log, None);
        assert_eq!(totals.balance, 700);
        assert_eq!(totals.total_income, 700);
    }

    #[test]
    fn test_month_isolation() {
        let log = vec![
            msg_at(Kind::Income, 10000, 2025, 1),
            msg_at(Kind::Expense, 4000, 2025, 2),
        ];

        let january = compute_totals(&log, Some("Janeiro 2025"));
        assert_eq!(january.balance, 10000);
        assert_eq!(january.total_expense, 0);

        let february = compute_totals(&log, Some("Fevereiro 2025"));
        assert_eq!(february.balance, -4000);
        assert_eq!(february.total_income, 0);
    }

    #[test]
    fn test_reset_scoped_to_its_own_month() {
        // Reset recorded in February must not truncate January's totals
        let log = vec![
            msg_at(Kind::Income, 10000, 2025, 1),
            msg_at(Kind::Reset, 0, 2025, 2),
            msg_at(Kind::Income, 500, 2025, 2),
        ];

        let january = compute_totals(&log, Some("Janeiro 2025"));
        assert_eq!(january.balance, 10000);

        let february = compute_totals(&log, Some("Fevereiro 2025"));
        assert_eq!(february.balance, 500);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let log = vec![
            msg(Kind::Income, 12345),
            msg(Kind::Reset, 0),
            msg(Kind::Expense, 678),
        ];

        let first = compute_totals(&log, Some("Janeiro 2025"));
        let second = compute_totals(&log, Some("Janeiro 2025"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_month_filter_yields_zero() {
        let log = vec![msg(Kind::Income, 10000)];
        assert_eq!(compute_totals(&log, Some("Julho 1999")), Totals::default());
    }
}
