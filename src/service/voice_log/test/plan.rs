use super::*;

/// Tests that joining a channel produces the join line and starts a session.
///
/// Expected: one join line and a tracker entry at the join time
#[test]
fn join_records_session_and_logs_join() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    let lines = service.plan(&change(None, Some(general())), at(0));

    assert_eq!(lines, vec!["✅ <@42> が **General** に参加しました。".to_string()]);
    assert_eq!(service.tracker().joined_at(&key()), Some(at(0)));
}

/// Tests a leave with no recorded join, e.g. the member was connected before startup.
///
/// Expected: exactly one leave line carrying the unknown-duration marker
#[test]
fn leave_without_record_reports_unknown_duration() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    let lines = service.plan(&change(Some(general()), None), at(0));

    assert_eq!(
        lines,
        vec![
            "❌ <@42> が **General** から退出しました。\n　滞在時間: 不明（入室時刻の記録なし）"
                .to_string()
        ]
    );
    assert!(service.tracker().store().is_empty());
}

/// Tests a full session: join at T0 and leave at T0+125s.
///
/// Expected: two lines across the session, the leave reporting 2分5秒
#[test]
fn join_then_leave_reports_stay_duration() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    let joined = service.plan(&change(None, Some(general())), at(0));
    let left = service.plan(&change(Some(general()), None), at(125));

    assert_eq!(joined.len(), 1);
    assert_eq!(
        left,
        vec!["❌ <@42> が **General** から退出しました。\n　滞在時間: 2分5秒".to_string()]
    );
    assert_eq!(service.tracker().joined_at(&key()), None);
}

/// Tests a direct move from one channel to another.
///
/// Expected: leave line for the origin first, then join line for the destination,
/// and the tracker restarted at the move time
#[test]
fn move_logs_leave_before_join_and_restarts_session() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    service.plan(&change(None, Some(general())), at(0));
    let lines = service.plan(&change(Some(general()), Some(gaming())), at(3661));

    assert_eq!(
        lines,
        vec![
            "❌ <@42> が **General** から退出しました。\n　滞在時間: 1時間1分1秒".to_string(),
            "✅ <@42> が **Gaming** に参加しました。".to_string(),
        ]
    );
    assert_eq!(service.tracker().joined_at(&key()), Some(at(3661)));
    assert_eq!(service.tracker().store().len(), 1);
}

/// Tests a move for a member whose original join was never observed.
///
/// Expected: unknown-duration leave line, then a join line that starts tracking
#[test]
fn move_without_record_still_starts_tracking() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    let lines = service.plan(&change(Some(general()), Some(gaming())), at(10));

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(UNKNOWN_STAY));
    assert!(lines[1].contains("**Gaming**"));
    assert_eq!(service.tracker().joined_at(&key()), Some(at(10)));
}

/// Tests attribute-only updates such as mute or deafen toggles.
///
/// Expected: no lines and the running session is left untouched
#[test]
fn same_channel_update_is_silent() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    service.plan(&change(None, Some(general())), at(0));
    let lines = service.plan(&change(Some(general()), Some(general())), at(30));

    assert!(lines.is_empty());
    assert_eq!(service.tracker().joined_at(&key()), Some(at(0)));
}

/// Tests the degenerate update with no channel on either side.
///
/// Expected: no lines
#[test]
fn empty_update_is_silent() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    assert!(service.plan(&change(None, None), at(0)).is_empty());
    assert!(service.tracker().store().is_empty());
}

/// Tests that events from other guilds are discarded.
///
/// Expected: no lines and no tracker entry
#[test]
fn other_guild_is_ignored() {
    let service = VoiceLogService::in_memory(GUILD_ID);
    let mut other = change(None, Some(general()));
    other.guild_id = 1;

    assert!(service.plan(&other, at(0)).is_empty());
    assert!(service.tracker().store().is_empty());
}

/// Tests that bot accounts are discarded.
///
/// Expected: no lines and no tracker entry
#[test]
fn bot_member_is_ignored() {
    let service = VoiceLogService::in_memory(GUILD_ID);
    let mut bot = change(None, Some(general()));
    bot.is_bot = true;

    assert!(service.plan(&bot, at(0)).is_empty());
    assert!(service.tracker().store().is_empty());
}

/// Tests a duplicate join without an intervening leave.
///
/// Expected: the timer restarts, so the stay counts from the second join
#[test]
fn duplicate_join_resets_timer() {
    let service = VoiceLogService::in_memory(GUILD_ID);

    service.plan(&change(None, Some(general())), at(0));
    service.plan(&change(None, Some(general())), at(600));
    let lines = service.plan(&change(Some(general()), None), at(660));

    assert!(lines[0].ends_with("滞在時間: 1分"));
}

/// Tests the message templates directly.
///
/// Expected: literal join/leave formats with the full-width indent on the second line
#[test]
fn message_templates() {
    assert_eq!(
        join_message("<@1>", "Lobby"),
        "✅ <@1> が **Lobby** に参加しました。"
    );
    assert_eq!(
        leave_message("<@1>", "Lobby", StayDuration::Known(Duration::zero())),
        "❌ <@1> が **Lobby** から退出しました。\n　滞在時間: 0秒"
    );
    assert_eq!(
        leave_message("<@1>", "Lobby", StayDuration::Unknown),
        "❌ <@1> が **Lobby** から退出しました。\n　滞在時間: 不明（入室時刻の記録なし）"
    );
}
