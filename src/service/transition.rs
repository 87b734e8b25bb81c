use crate::model::voice::{Transition, VoiceChannelRef};

/// Classifies a member's voice presence change.
///
/// Channels are compared by id only, so a rename between the two states is not a move.
/// An empty pair is not a valid presence delta and is treated as `NoChange`.
///
/// # Arguments
/// - `before` - Channel the member was connected to before the event
/// - `after` - Channel the member is connected to after the event
///
/// # Returns
/// - `Transition` - Join, leave, move, or no change
pub fn classify(before: Option<&VoiceChannelRef>, after: Option<&VoiceChannelRef>) -> Transition {
    match (before, after) {
        (None, Some(to)) => Transition::Joined(to.clone()),
        (Some(from), None) => Transition::Left(from.clone()),
        (Some(from), Some(to)) if from.id != to.id => Transition::Moved {
            from: from.clone(),
            to: to.clone(),
        },
        _ => Transition::NoChange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> VoiceChannelRef {
        VoiceChannelRef::new(10, "General")
    }

    fn gaming() -> VoiceChannelRef {
        VoiceChannelRef::new(20, "Gaming")
    }

    #[test]
    fn entering_a_channel_is_a_join() {
        assert_eq!(
            classify(None, Some(&general())),
            Transition::Joined(general())
        );
    }

    #[test]
    fn disconnecting_is_a_leave() {
        assert_eq!(classify(Some(&general()), None), Transition::Left(general()));
    }

    #[test]
    fn switching_channels_is_a_move() {
        let transition = classify(Some(&general()), Some(&gaming()));

        assert_eq!(
            transition,
            Transition::Moved {
                from: general(),
                to: gaming()
            }
        );
        assert_eq!(transition.left(), Some(&general()));
        assert_eq!(transition.joined(), Some(&gaming()));
    }

    #[test]
    fn same_channel_is_no_change() {
        assert_eq!(
            classify(Some(&general()), Some(&general())),
            Transition::NoChange
        );
    }

    #[test]
    fn same_channel_with_new_name_is_no_change() {
        let renamed = VoiceChannelRef::new(10, "General (renamed)");

        assert_eq!(
            classify(Some(&general()), Some(&renamed)),
            Transition::NoChange
        );
    }

    #[test]
    fn no_channel_on_either_side_is_no_change() {
        let transition = classify(None, None);

        assert_eq!(transition, Transition::NoChange);
        assert_eq!(transition.left(), None);
        assert_eq!(transition.joined(), None);
    }
}
