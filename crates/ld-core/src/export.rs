//! Winner exports
//!
//! Text producers only; writing files or touching a clipboard is left to
//! the front-end.

use chrono::NaiveDate;

use crate::error::{LdError, LdResult};
use crate::winner::Winner;

/// CSV header row
pub const CSV_HEADER: [&str; 3] = ["Prize #", "Ticket Number", "Time"];

/// Winners as a comma-separated table, header first, one row per winner
/// in draw order.
pub fn export_csv(winners: &[Winner]) -> LdResult<String> {
    if winners.is_empty() {
        return Err(LdError::NoWinners);
    }

    let mut lines = Vec::with_capacity(winners.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for winner in winners {
        lines.push(format!(
            "{},{},{}",
            winner.prize_number,
            winner.ticket_number,
            winner.time_label()
        ));
    }
    Ok(lines.join("\n"))
}

/// One line per winner: `Prize #1: Ticket 42`
pub fn clipboard_text(winners: &[Winner]) -> LdResult<String> {
    if winners.is_empty() {
        return Err(LdError::NoWinners);
    }

    Ok(winners
        .iter()
        .map(|w| format!("Prize #{}: Ticket {}", w.prize_number, w.ticket_number))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Download name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("lucky-draw-winners-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample_winners() -> Vec<Winner> {
        let ts = Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        vec![Winner::at(1, 17, ts), Winner::at(2, 342, ts)]
    }

    #[test]
    fn test_csv_layout() {
        let csv = export_csv(&sample_winners()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Prize #,Ticket Number,Time");
        assert_eq!(lines[1], "1,17,09:30 AM");
        assert_eq!(lines[2], "2,342,09:30 AM");
    }

    #[test]
    fn test_empty_export_rejected() {
        assert!(matches!(export_csv(&[]), Err(LdError::NoWinners)));
        assert!(matches!(clipboard_text(&[]), Err(LdError::NoWinners)));
    }

    #[test]
    fn test_clipboard_text() {
        let text = clipboard_text(&sample_winners()).unwrap();
        assert_eq!(text, "Prize #1: Ticket 17\nPrize #2: Ticket 342");
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
        assert_eq!(export_file_name(date), "lucky-draw-winners-2025-12-24.csv");
    }
}
