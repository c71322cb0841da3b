use anyhow::{Result, bail};

use linkbook_core::identity::UserIdentity;
use linkbook_core::profile_link::{ProfileLinkResolver, ProfileLinkState, ResolverOptions};
use linkbook_infrastructure::provider_from_settings;

use crate::context::AppContext;

pub async fn link(
    context: &AppContext,
    user_id: String,
    domain: String,
    handle: Option<String>,
) -> Result<()> {
    let settings = &context.config.server;
    let provider = provider_from_settings(settings);
    let options = ResolverOptions {
        fetch_timeout: settings.fetch_timeout(),
    };

    let resolver =
        ProfileLinkResolver::spawn(UserIdentity::new(user_id, domain), handle, provider, options);
    let state = resolver.wait_resolved().await;

    if state.has_error {
        bail!(
            "Could not load server links for {}, no profile link available",
            state.identity
        );
    }

    print!("{}", render(&state));
    Ok(())
}

/// Text shown for a resolved state: handle label (if any), then the links.
fn render(state: &ProfileLinkState) -> String {
    let mut out = String::new();
    let handle = state.display_handle();
    if !handle.is_empty() {
        out.push_str(&handle);
        out.push('\n');
    }
    out.push_str(&format!("Profile link:   {}\n", state.profile_link));
    out.push_str(&format!("Shareable link: {}\n", state.shareable_link));
    out
}
