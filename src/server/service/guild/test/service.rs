use super::*;

/// Tests the admin guild list of the dashboard.
///
/// Expected: only administered guilds, in Discord's order
#[tokio::test(start_paused = true)]
async fn admin_guilds_are_filtered() -> Result<(), AppError> {
    let api = FakeGuildApi::always(vec![guild("1", 0x8), guild("2", 0x4), guild("3", 0xC)]);
    let cache = GuildCache::new(fetcher(&api), DEFAULT_GUILD_CACHE_CAPACITY);

    let guilds = GuildService::new(&cache).admin_guilds(&user()).await?;

    let ids: Vec<&str> = guilds.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    Ok(())
}

/// Tests the dashboard and server views share cached data.
///
/// Expected: a single remote fetch for both lookups
#[tokio::test(start_paused = true)]
async fn lookups_share_the_cache() -> Result<(), AppError> {
    let api = FakeGuildApi::always(vec![guild("1", 0x8)]);
    let cache = GuildCache::new(fetcher(&api), DEFAULT_GUILD_CACHE_CAPACITY);
    let service = GuildService::new(&cache);

    service.admin_guilds(&user()).await?;
    service.managed_guild(&user(), "1").await?;

    assert_eq!(api.call_count(), 1);

    Ok(())
}

/// Tests the per-guild lookup outcomes.
///
/// Expected: absent and non-admin guilds are auth errors, an admin guild is returned
#[tokio::test(start_paused = true)]
async fn managed_guild_requires_admin() {
    let api = FakeGuildApi::always(vec![guild("1", 0x0), guild("2", 0x8)]);
    let cache = GuildCache::new(fetcher(&api), DEFAULT_GUILD_CACHE_CAPACITY);
    let service = GuildService::new(&cache);

    let missing = service.managed_guild(&user(), "3").await;
    let not_admin = service.managed_guild(&user(), "1").await;
    let admin = service.managed_guild(&user(), "2").await;

    assert!(matches!(
        missing,
        Err(AppError::AuthErr(AuthError::GuildNotFound { .. }))
    ));
    assert!(matches!(
        not_admin,
        Err(AppError::AuthErr(AuthError::MissingAdministrator { .. }))
    ));
    assert_eq!(admin.unwrap().id, "2");
}

/// Tests fetch failures surface as Discord errors.
///
/// Expected: Err(AppError::DiscordErr(PersistentRateLimit))
#[tokio::test(start_paused = true)]
async fn fetch_failure_propagates() {
    let api = FakeGuildApi::scripted(vec![Reply::RateLimited(None)]);
    let cache = GuildCache::new(
        fetcher(&api).with_backoff(1, Duration::from_millis(10)),
        DEFAULT_GUILD_CACHE_CAPACITY,
    );

    let result = GuildService::new(&cache).admin_guilds(&user()).await;

    assert!(matches!(
        result,
        Err(AppError::DiscordErr(DiscordApiError::PersistentRateLimit { attempts: 2 }))
    ));
}
