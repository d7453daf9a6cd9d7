//! Proximity interaction: nearest-target search and per-kind dispatch.
use crate::env::{GameMap, Interactable, InteractableKind};
use crate::state::{Actor, GridCell, PixelPos};

/// What an interact press resolved to.
///
/// Actor mutations (sitting down, standing up) are already applied when this
/// is returned; everything else is for the caller to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionOutcome {
    /// Nothing within reach.
    Nothing,
    StoodUp,
    SatDown { cell: GridCell },
    OpenSubmission,
    OpenNoticeBoard,
    /// Honour the active ceremony; `idle_message` is shown when nobody is
    /// being buried.
    PayRespects { idle_message: Option<String> },
    ReadInscription { cell: GridCell },
    Notify(String),
}

/// Nearest interactable whose cell centre lies strictly within `radius` of
/// `point`.
///
/// Candidates are scanned in row-major registry order and only a strictly
/// shorter distance replaces the current best, so equal distances resolve to
/// the first cell in that order.
pub fn nearest_interactable(
    map: &GameMap,
    point: PixelPos,
    radius: f32,
) -> Option<(GridCell, &Interactable)> {
    let mut best: Option<(f32, GridCell, &Interactable)> = None;

    for (cell, interactable) in map.interactables() {
        let distance = point.distance(cell.center());
        if distance >= radius {
            continue;
        }
        if best.is_none_or(|(closest, _, _)| distance < closest) {
            best = Some((distance, cell, interactable));
        }
    }

    best.map(|(_, cell, interactable)| (cell, interactable))
}

/// Target the passive hint would highlight for this actor.
pub fn proximity_hint<'a>(
    actor: &Actor,
    map: &'a GameMap,
    radius: f32,
) -> Option<(GridCell, &'a Interactable)> {
    nearest_interactable(map, actor.center(), radius)
}

/// Resolves one interact press.
pub fn resolve(actor: &mut Actor, map: &GameMap, radius: f32) -> InteractionOutcome {
    if actor.stand_up() {
        return InteractionOutcome::StoodUp;
    }

    let Some((cell, target)) = nearest_interactable(map, actor.center(), radius) else {
        return InteractionOutcome::Nothing;
    };

    match target.kind {
        InteractableKind::Chair => {
            actor.sit_on(cell);
            InteractionOutcome::SatDown { cell }
        }
        InteractableKind::Priest | InteractableKind::Receptionist => {
            InteractionOutcome::OpenSubmission
        }
        InteractableKind::NoticeBoard => InteractionOutcome::OpenNoticeBoard,
        InteractableKind::Coffin => InteractionOutcome::PayRespects {
            idle_message: target.message.clone(),
        },
        InteractableKind::Tombstone => InteractionOutcome::ReadInscription { cell },
        InteractableKind::Fountain => match &target.message {
            Some(message) => InteractionOutcome::Notify(message.clone()),
            None => InteractionOutcome::Nothing,
        },
    }
}
