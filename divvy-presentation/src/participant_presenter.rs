use divvy_domain::ParticipantName;
use divvy_i18n as i18n;

pub struct ParticipantPresenter;

impl ParticipantPresenter {
    pub fn render(participants: &[ParticipantName], capacity: Option<usize>) -> String {
        if participants.is_empty() {
            return format!("{}\n", i18n::NO_PARTICIPANTS);
        }

        let mut out = String::new();
        for name in participants {
            out.push_str(name.as_str());
            out.push('\n');
        }
        out.push_str(&i18n::participant_count(participants.len(), capacity));
        out.push('\n');
        out
    }
}
