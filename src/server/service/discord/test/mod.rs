use crate::server::{error::discord::DiscordApiError, service::discord::api::*};
use std::time::Duration;
use test_utils::{builder::TestBuilder, factory, mock::MockResponse};

mod parse_retry_after;
