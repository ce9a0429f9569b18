//! Command dispatch for the terminal editor.

use anyhow::anyhow;

use draftpad_core::domain::{Post, PostFilter};
use draftpad_core::DomainError;
use draftpad_infra::{AutosaveConfig, SaveOutcome};
use draftpad_shared::PostSummary;
use draftpad_shared::dto::{format_date, status_label};

use crate::commands::{Command, HELP};
use crate::session::EditorSession;
use crate::state::AppState;

/// Output of one command.
#[derive(Debug, Default)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }
}

pub struct Shell {
    state: AppState,
    autosave: AutosaveConfig,
    session: Option<EditorSession>,
}

impl Shell {
    pub fn new(state: AppState, autosave: AutosaveConfig) -> Self {
        Self {
            state,
            autosave,
            session: None,
        }
    }

    pub fn prompt(&self) -> &'static str {
        if self.session.is_some() { "draftpad*> " } else { "draftpad> " }
    }

    pub async fn execute(&mut self, command: Command) -> anyhow::Result<Reply> {
        match command {
            Command::List(filter) => self.list(filter).await,
            Command::New => {
                self.close_session().await?;
                self.start(Post::draft());
                Ok(Reply::line("Editing new post"))
            }
            Command::Open(id) => {
                let post = self
                    .state
                    .repo
                    .get(&id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound { id: id.clone() })?;
                self.close_session().await?;
                let reply = Reply::line(format!("Editing {}", display_title(&post)));
                self.start(post);
                Ok(reply)
            }
            Command::Title(text) => self.edit(move |p| replace(&mut p.title, text)).await,
            Command::Body(text) => self.edit(move |p| replace(&mut p.body, text)).await,
            Command::Append(text) => {
                self.edit(move |p| {
                    if !p.body.is_empty() {
                        p.body.push('\n');
                    }
                    p.body.push_str(&text);
                    true
                })
                .await
            }
            Command::Tag(tag) => self.edit(move |p| p.add_tag(&tag)).await,
            Command::Untag(tag) => self.edit(move |p| p.remove_tag(&tag)).await,
            Command::Save => match self.session()?.save().await? {
                SaveOutcome::Saved(post) => Ok(Reply::line(format!("Saved {}", post.id))),
                SaveOutcome::Unchanged => Ok(Reply::line("No changes to save")),
            },
            Command::Publish => {
                let post = self.session()?.publish().await?;
                self.close_session().await?;
                Ok(Reply::line(format!("Published {}", post.id)))
            }
            Command::Delete(id) => {
                let open_here = match &self.session {
                    Some(session) => session.draft().await.id == id,
                    None => false,
                };
                if open_here {
                    // Deleting what is open: drop without flushing.
                    self.session = None;
                }
                self.state.repo.delete(&id).await?;
                Ok(Reply::line(format!("Deleted {id}")))
            }
            Command::Show => {
                let session = self.session()?;
                let mut lines = show(&session.draft().await);
                lines.insert(0, format!("autosave: {}", session.status()));
                Ok(Reply { lines, quit: false })
            }
            Command::Close => {
                self.close_session().await?;
                Ok(Reply::line("Closed"))
            }
            Command::Help => Ok(Reply::line(HELP)),
            Command::Quit => {
                self.close_session().await?;
                Ok(Reply {
                    lines: Vec::new(),
                    quit: true,
                })
            }
        }
    }

    fn start(&mut self, post: Post) {
        self.session = Some(EditorSession::open(
            self.state.repo.clone(),
            post,
            self.autosave.clone(),
        ));
    }

    fn session(&self) -> anyhow::Result<&EditorSession> {
        self.session
            .as_ref()
            .ok_or_else(|| anyhow!("no post open (use `new` or `open <id>`)"))
    }

    async fn close_session(&mut self) -> anyhow::Result<()> {
        if let Some(session) = self.session.take() {
            session.close().await?;
        }
        Ok(())
    }

    async fn edit<F>(&self, f: F) -> anyhow::Result<Reply>
    where
        F: FnOnce(&mut Post) -> bool,
    {
        let session = self.session()?;
        if session.edit(f).await {
            Ok(Reply::default())
        } else {
            Ok(Reply::line("Nothing changed"))
        }
    }

    async fn list(&self, filter: PostFilter) -> anyhow::Result<Reply> {
        let posts = self.state.repo.list_by_status(filter).await?;
        if posts.is_empty() {
            return Ok(Reply::line("No posts found"));
        }

        let mut lines = Vec::with_capacity(posts.len() * 2);
        for post in &posts {
            let summary = PostSummary::from(post);
            let tags = if summary.tags.is_empty() {
                String::new()
            } else {
                format!("  #{}", summary.tags.join(" #"))
            };
            lines.push(format!(
                "{}  {}  [{}]{}  updated {}",
                summary.id, summary.title, summary.status_label, tags, summary.updated
            ));
            lines.push(format!("    {}", summary.excerpt.replace('\n', " ")));
        }
        Ok(Reply {
            lines,
            quit: false,
        })
    }
}

fn replace(field: &mut String, value: String) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

fn display_title(post: &Post) -> &str {
    if post.title.trim().is_empty() { "Untitled" } else { &post.title }
}

fn show(post: &Post) -> Vec<String> {
    let id = if post.is_persisted() { post.id.as_str() } else { "(unsaved)" };
    let mut lines = vec![
        format!("id:      {id}"),
        format!("title:   {}", display_title(post)),
        format!("status:  {}", status_label(post.status)),
        format!("tags:    {}", post.tags.join(", ")),
        format!("created: {}", format_date(post.created_at)),
        format!("updated: {}", format_date(post.updated_at)),
        String::new(),
    ];
    lines.extend(post.body.lines().map(str::to_string));
    lines
}
