use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Store a bearer token issued by the identity provider
    Login {
        #[arg(long)]
        token: String,

        /// Lifetime in seconds (defaults to token.ttl_secs from config)
        #[arg(long)]
        ttl_secs: Option<u64>,
    },

    /// Forget the stored token
    Logout,

    /// Show the signed-in user's profile
    Whoami {
        /// Bypass the cached profile
        #[arg(long)]
        refresh: bool,
    },

    /// Resolve the tenant key for a page view
    Resolve {
        /// Organization id to look up before falling back to the host
        #[arg(long)]
        org_id: Option<String>,
    },

    /// Run the full page bootstrap: profile, tenant and tenant content
    Bootstrap,
}
