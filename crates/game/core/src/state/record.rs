use super::{RecordId, Timestamp};

/// Eulogy used whenever text generation fails or returns nothing usable.
pub fn fallback_eulogy(name: &str, cause: &str) -> String {
    format!(
        "Here lies {name}, taken from us by {cause}. The spirits were silent today, \
so we will keep this short: rest in peace."
    )
}

/// Inscription used whenever text generation fails or returns nothing usable.
pub const FALLBACK_INSCRIPTION: &str = "Gone, but not forgotten. Mostly.";

/// A submission that is waiting for its eulogy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingRecord {
    pub id: RecordId,
    pub name: String,
    pub cause: String,
    pub created_at: Timestamp,
}

impl PendingRecord {
    /// Attaches generated text, substituting the fallback eulogy for blank text.
    pub fn complete(self, eulogy: String) -> FuneralRecord {
        let eulogy = if eulogy.trim().is_empty() {
            fallback_eulogy(&self.name, &self.cause)
        } else {
            eulogy
        };

        FuneralRecord {
            id: self.id,
            name: self.name,
            cause: self.cause,
            eulogy,
            created_at: self.created_at,
            attendees: 0,
        }
    }
}

/// A funeral moving through queue, ceremony and history.
///
/// Everything except the attendee count is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuneralRecord {
    id: RecordId,
    name: String,
    cause: String,
    eulogy: String,
    created_at: Timestamp,
    attendees: u32,
}

impl FuneralRecord {
    /// The ceremony seeded into an empty queue at startup.
    pub fn opening(created_at: Timestamp) -> Self {
        Self {
            id: RecordId::OPENING,
            name: "Your Motivation".to_string(),
            cause: "Doomscrolling".to_string(),
            eulogy: "It died as it lived: consuming content without creating anything. \
May it find peace in the algorithm."
                .to_string(),
            created_at,
            attendees: 0,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub fn eulogy(&self) -> &str {
        &self.eulogy
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn attendees(&self) -> u32 {
        self.attendees
    }

    /// Records one more mourner and returns the new count.
    pub fn pay_respects(&mut self) -> u32 {
        self.attendees = self.attendees.saturating_add(1);
        self.attendees
    }

    /// Builds a record around arbitrary eulogy text, blank included.
    #[cfg(test)]
    pub(crate) fn with_raw_eulogy(id: RecordId, eulogy: &str) -> Self {
        Self {
            id,
            name: format!("Subject {id}"),
            cause: "Boredom".to_string(),
            eulogy: eulogy.to_string(),
            created_at: Timestamp::from_millis(id.0),
            attendees: 0,
        }
    }
}
