//! Single-shot asynchronous profile link resolution.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::model::ProfileLinkState;
use super::server_config::{ServerConfigError, ServerConfigProvider, ServerLinks};
use crate::identity::UserIdentity;

/// Tuning for a resolver instance.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Upper bound for the configuration fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl ResolverOptions {
    pub fn with_fetch_timeout(timeout: Duration) -> Self {
        Self {
            fetch_timeout: Some(timeout),
        }
    }
}

/// Resolves the self profile link for one identity.
///
/// Construction starts exactly one configuration fetch on the current tokio
/// runtime. When it completes the resolver publishes one new
/// [`ProfileLinkState`] snapshot and never changes again; to retry, build a
/// new resolver.
///
/// The fetch task belongs to the resolver. Dropping the resolver, or calling
/// [`cancel`](Self::cancel), abandons the fetch and the state stays pending.
pub struct ProfileLinkResolver {
    state: watch::Receiver<ProfileLinkState>,
    task: JoinHandle<()>,
}

impl ProfileLinkResolver {
    /// Starts resolving `identity` against `provider`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn spawn(
        identity: UserIdentity,
        handle: Option<String>,
        provider: Arc<dyn ServerConfigProvider>,
        options: ResolverOptions,
    ) -> Self {
        let initial = ProfileLinkState::pending(identity, handle);
        let (sender, receiver) = watch::channel(initial.clone());

        let task = tokio::spawn(async move {
            let next = match fetch_links(provider.as_ref(), options.fetch_timeout).await {
                Ok(links) => {
                    tracing::info!(
                        user_id = %initial.identity,
                        server = %links.title,
                        "Resolved self profile link"
                    );
                    initial.resolved(&links.accounts)
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = %initial.identity,
                        error = %e,
                        "Failed to fetch server links for profile link"
                    );
                    initial.failed()
                }
            };
            // send_replace also stores the value when nobody is subscribed
            sender.send_replace(next);
        });

        Self {
            state: receiver,
            task,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> ProfileLinkState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified when the snapshot is replaced.
    pub fn subscribe(&self) -> watch::Receiver<ProfileLinkState> {
        self.state.clone()
    }

    /// Waits for a terminal snapshot.
    ///
    /// Returns the pending snapshot if the fetch was cancelled before it
    /// finished.
    pub async fn wait_resolved(&self) -> ProfileLinkState {
        let mut receiver = self.state.clone();
        let terminal = receiver
            .wait_for(|state| state.phase.is_terminal())
            .await
            .map(|state| state.clone());

        match terminal {
            Ok(state) => state,
            Err(_) => receiver.borrow().clone(),
        }
    }

    /// Abandons the in-flight fetch. No-op once resolution finished.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the fetch task has stopped, either finished or cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ProfileLinkResolver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn fetch_links(
    provider: &dyn ServerConfigProvider,
    timeout: Option<Duration>,
) -> Result<ServerLinks, ServerConfigError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.server_links())
            .await
            .map_err(|_| ServerConfigError::Timeout {
                millis: saturating_millis(limit),
            })?,
        None => provider.server_links().await,
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile_link::ResolutionPhase;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, oneshot};

    fn links(accounts: &str) -> ServerLinks {
        ServerLinks {
            api: "https://prod-nginz-https.wire.com".to_string(),
            accounts: accounts.to_string(),
            web_socket: "https://prod-nginz-ssl.wire.com".to_string(),
            teams: "https://teams.wire.com".to_string(),
            website: "https://wire.com".to_string(),
            title: "production".to_string(),
            is_on_premises: false,
        }
    }

    struct FixedProvider {
        result: Result<ServerLinks, ServerConfigError>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(result: Result<ServerLinks, ServerConfigError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ServerConfigProvider for FixedProvider {
        async fn server_links(&self) -> Result<ServerLinks, ServerConfigError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Answers only once the test sends the result.
    struct GatedProvider {
        gate: Mutex<Option<oneshot::Receiver<Result<ServerLinks, ServerConfigError>>>>,
    }

    #[async_trait]
    impl ServerConfigProvider for GatedProvider {
        async fn server_links(&self) -> Result<ServerLinks, ServerConfigError> {
            let receiver = self.gate.lock().await.take();
            match receiver {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(ServerConfigError::Unavailable("gate closed".into()))),
                None => Err(ServerConfigError::Unavailable("already fetched".into())),
            }
        }
    }

    struct SilentProvider;

    #[async_trait]
    impl ServerConfigProvider for SilentProvider {
        async fn server_links(&self) -> Result<ServerLinks, ServerConfigError> {
            std::future::pending().await
        }
    }

    fn gated() -> (
        Arc<GatedProvider>,
        oneshot::Sender<Result<ServerLinks, ServerConfigError>>,
    ) {
        let (sender, receiver) = oneshot::channel();
        let provider = Arc::new(GatedProvider {
            gate: Mutex::new(Some(receiver)),
        });
        (provider, sender)
    }

    #[tokio::test]
    async fn test_success_formats_link_from_local_id() {
        let provider = FixedProvider::new(Ok(links("https://account.wire.com")));
        let identity = UserIdentity::new("aaaaaaa-222-3333-4444-55555555", "wire.com");

        let resolver = ProfileLinkResolver::spawn(
            identity.clone(),
            Some("userid".to_string()),
            provider.clone(),
            ResolverOptions::default(),
        );
        let state = resolver.wait_resolved().await;

        assert_eq!(
            state.profile_link,
            "https://account.wire.com/user-profile/?id=aaaaaaa-222-3333-4444-55555555"
        );
        assert_eq!(state.shareable_link, state.profile_link);
        assert!(!state.has_error);
        assert_eq!(state.phase, ResolutionPhase::Resolved);
        assert_eq!(state.identity, identity);
        assert_eq!(state.handle.as_deref(), Some("userid"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_keeps_links_empty() {
        let provider = FixedProvider::new(Err(ServerConfigError::Http { status: 503 }));

        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            provider.clone(),
            ResolverOptions::default(),
        );
        let state = resolver.wait_resolved().await;

        assert!(state.has_error);
        assert_eq!(state.profile_link, "");
        assert_eq!(state.shareable_link, "");
        assert_eq!(state.phase, ResolutionPhase::Failed);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_state_is_pending_until_fetch_completes() {
        let (provider, gate) = gated();
        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            provider,
            ResolverOptions::default(),
        );

        tokio::task::yield_now().await;
        let before = resolver.state();
        assert_eq!(before.phase, ResolutionPhase::Pending);
        assert_eq!(before.profile_link, "");

        let mut updates = resolver.subscribe();
        gate.send(Ok(links("https://accounts.example.org"))).unwrap();
        updates.changed().await.unwrap();

        let after = updates.borrow().clone();
        assert_eq!(after.profile_link, "https://accounts.example.org/user-profile/?id=user");
        // an old snapshot is never mutated
        assert_eq!(before.phase, ResolutionPhase::Pending);
        assert_eq!(resolver.state(), after);
    }

    #[tokio::test]
    async fn test_terminal_state_does_not_change() {
        let provider = FixedProvider::new(Ok(links("https://account.wire.com")));
        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            provider.clone(),
            ResolverOptions::default(),
        );

        let first = resolver.wait_resolved().await;
        let second = resolver.wait_resolved().await;
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_leaves_state_pending() {
        let (provider, gate) = gated();
        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            provider,
            ResolverOptions::default(),
        );

        resolver.cancel();
        let state = resolver.wait_resolved().await;
        assert_eq!(state.phase, ResolutionPhase::Pending);
        assert!(!state.has_error);

        // a late answer goes nowhere
        let _ = gate.send(Ok(links("https://account.wire.com")));
        tokio::task::yield_now().await;
        assert_eq!(resolver.state().phase, ResolutionPhase::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_as_error() {
        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            Arc::new(SilentProvider),
            ResolverOptions::with_fetch_timeout(Duration::from_secs(10)),
        );

        let state = resolver.wait_resolved().await;
        assert!(state.has_error);
        assert_eq!(state.phase, ResolutionPhase::Failed);
        assert_eq!(state.profile_link, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_timeout_stays_pending() {
        let resolver = ProfileLinkResolver::spawn(
            UserIdentity::new("user", "wire.com"),
            None,
            Arc::new(SilentProvider),
            ResolverOptions::default(),
        );

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(resolver.state().phase, ResolutionPhase::Pending);
        assert!(!resolver.is_finished());
    }

    #[test]
    fn test_timeout_millis_saturate() {
        assert_eq!(saturating_millis(Duration::from_secs(10)), 10_000);
        assert_eq!(saturating_millis(Duration::from_secs(u64::MAX)), u64::MAX);
    }
}
