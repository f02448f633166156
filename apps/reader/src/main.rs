use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    AlertSink, CommentInput, CommentList, CommentRegion, FollowControl, FollowRegion,
    PageApiClient, PageBindings, PageContext, PageInteractionController, StaticCookies,
    TextSurface,
};
use shared::{
    domain::{FollowState, PostSlug, Username},
    protocol::CommentPayload,
};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Blog server base url; falls back to configuration.
    #[arg(long)]
    server_url: Option<String>,
    /// Slug of the post page being viewed.
    #[arg(long)]
    slug: String,
    /// Toggle follow for this author.
    #[arg(long)]
    follow: Option<String>,
    /// Submit this comment body.
    #[arg(long)]
    comment: Option<String>,
    /// Cookie string, e.g. "csrftoken=...; sessionid=..."; falls back to
    /// configuration.
    #[arg(long)]
    cookies: Option<String>,
}

struct StdoutLabel(&'static str);

impl TextSurface for StdoutLabel {
    fn set_text(&self, text: &str) {
        println!("{}: {text}", self.0);
    }
}

struct StdoutFollowControl;

impl FollowControl for StdoutFollowControl {
    fn set_state(&self, state: FollowState) {
        println!("follow-button: {}", state.action_label());
    }
}

struct StdoutCommentList;

impl CommentList for StdoutCommentList {
    fn append(&self, comment: &CommentPayload) {
        println!(
            "comment: {} ({}) {}",
            comment.author, comment.created_at, comment.body
        );
    }
}

struct StderrAlert;

impl AlertSink for StderrAlert {
    fn alert(&self, message: &str) {
        eprintln!("alert: {message}");
    }
}

/// Comment body handed in on the command line; a terminal run has no
/// persistent input field to clear.
struct OneShotInput(String);

impl CommentInput for OneShotInput {
    fn body(&self) -> String {
        self.0.clone()
    }

    fn clear(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let server_url = args.server_url.unwrap_or(settings.server_url);
    let cookies = args.cookies.unwrap_or(settings.cookies);

    let api = PageApiClient::new(&server_url, Arc::new(StaticCookies(cookies)))?;

    let mut bindings = PageBindings {
        view_counter: Some(Arc::new(StdoutLabel("view-count"))),
        ..PageBindings::default()
    };
    if let Some(username) = &args.follow {
        bindings.follow = Some(
            FollowRegion::new(Arc::new(StdoutFollowControl), Username::new(username.clone()))
                .with_follower_count(Arc::new(StdoutLabel("follower-count"))),
        );
    }
    if let Some(body) = &args.comment {
        bindings.comments = Some(
            CommentRegion::new(
                Arc::new(OneShotInput(body.clone())),
                Arc::new(StdoutCommentList),
            )
            .with_count(Arc::new(StdoutLabel("comment-count")))
            .with_alerts(Arc::new(StderrAlert)),
        );
    }

    info!("opening page session for {} at {server_url}", args.slug);
    let controller = PageInteractionController::new(
        Arc::new(api),
        PageContext {
            post_slug: Some(PostSlug::new(args.slug)),
        },
        bindings,
    );

    if let Some(task) = controller.on_page_load() {
        task.await?;
    }
    if args.follow.is_some() {
        if let Some(task) = controller.on_follow_click() {
            task.await?;
        }
    }
    if args.comment.is_some() {
        if let Some(task) = controller.on_comment_submit() {
            task.await?;
        }
    }

    Ok(())
}
