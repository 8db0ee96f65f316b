//! Terminal rendering of settings, events and winners

use anyhow::Result;
use ld_core::{DrawSettings, Winner};
use ld_stage::CeremonyEvent;

pub fn settings_json(settings: &DrawSettings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// One line for the operator, or `None` for events not worth printing
pub fn describe(event: &CeremonyEvent) -> Option<String> {
    let line = match event {
        CeremonyEvent::SceneChanged { to, .. } => format!("== {} ==", to.display_name()),
        CeremonyEvent::DrawStarted {
            draw_index,
            prize_number,
            phase,
            ..
        } => format!(
            "Drawing prize #{} (draw {}, {})",
            prize_number,
            draw_index + 1,
            phase.type_name()
        ),
        CeremonyEvent::WinnerCommitted {
            prize_number,
            ticket_number,
        } => format!("*** Prize #{}: ticket {} ***", prize_number, ticket_number),
        CeremonyEvent::CountdownTick { remaining } => format!("  {}...", remaining),
        CeremonyEvent::SuspenseStyleChosen { style } => {
            format!("  (suspense: {})", style.type_name())
        }
        CeremonyEvent::Paused => "Paused".to_string(),
        CeremonyEvent::Resumed => "Resumed".to_string(),
        CeremonyEvent::Reset => "Ceremony reset".to_string(),
        CeremonyEvent::SettingsApplied => "Settings applied".to_string(),
        CeremonyEvent::Notice { message } => format!("! {}", message),
        CeremonyEvent::StatusChanged { .. } | CeremonyEvent::PhaseStep { .. } => return None,
    };
    Some(line)
}

pub fn winners_table(winners: &[Winner]) -> String {
    if winners.is_empty() {
        return "No winners yet".to_string();
    }

    let mut lines = vec![format!("{:<8} {:>10} {:>9}", "Prize", "Ticket", "Time")];
    for w in winners {
        lines.push(format!(
            "{:<8} {:>10} {:>9}",
            format!("#{}", w.prize_number),
            w.ticket_number,
            w.time_label()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_stage::{DrawStatus, Scene};

    #[test]
    fn test_describe_skips_noise() {
        let status = CeremonyEvent::StatusChanged {
            from: DrawStatus::Idle,
            to: DrawStatus::Drawing,
        };
        assert!(describe(&status).is_none());

        let scene = CeremonyEvent::SceneChanged {
            from: Scene::Ready,
            to: Scene::WinnersWall,
        };
        assert_eq!(describe(&scene).as_deref(), Some("== Winners Wall =="));
    }

    #[test]
    fn test_winners_table() {
        assert_eq!(winners_table(&[]), "No winners yet");
        let table = winners_table(&[Winner::new(1, 42), Winner::new(2, 7)]);
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(1).unwrap().starts_with("#1"));
    }
}
