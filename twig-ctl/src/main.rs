use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use twig_client::{
    api::{CommentId, Error, Gateway, NewComment},
    render, text, Controller, HttpGateway, Intent,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base URL of the comment service
    #[structopt(
        short,
        long,
        env = "TWIG_HOST",
        default_value = "http://localhost:8080"
    )]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List a page of root comments
    List {
        #[structopt(short, long, default_value = "1")]
        page: usize,

        /// Only show threads whose root contains this text
        #[structopt(short, long, default_value = "")]
        search: String,
    },

    /// Show all the replies to a comment
    Replies { id: i64 },

    /// Post a comment
    Create {
        content: String,

        /// Comment to reply to, the new comment is a root if unset
        #[structopt(short, long)]
        reply_to: Option<i64>,
    },

    /// Delete a comment along with all its replies
    Delete {
        id: i64,

        /// Do not ask for confirmation
        #[structopt(short, long)]
        yes: bool,
    },

    /// Browse comments interactively
    Shell,
}

type Input = Lines<BufReader<Stdin>>;

async fn confirm(input: &mut Input, question: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{question} [y/N] ").as_bytes()).await?;
    stdout.flush().await?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn delete_question(id: CommentId) -> String {
    format!("Delete comment #{id} and all its replies?")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let gw = HttpGateway::new(opt.host);
    tracing::debug!(host = gw.host(), "using comment service");
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match opt.cmd {
        Command::List { page, search } => {
            let p = gw
                .list_page(page.max(1), &search)
                .await
                .context("failed to load comments")?;
            print!("{}", text::tree_to_text(&render::render(&p.comments)));
            if let Some(pager) = render::render_pager(p.pages, page.max(1)) {
                println!("{}", text::pager_to_text(&pager));
            }
        }
        Command::Replies { id } => {
            let replies = gw
                .list_replies(CommentId(id))
                .await
                .context("failed to load replies")?;
            print!("{}", text::tree_to_text(&render::render(&replies)));
        }
        Command::Create { content, reply_to } => {
            let content = content.trim();
            if content.is_empty() {
                return Err(Error::empty_content().into());
            }
            let c = gw
                .create(&NewComment {
                    content: String::from(content),
                    parent_id: reply_to.map(CommentId),
                })
                .await
                .context("failed to create comment")?;
            tracing::info!(id = %c.id, parent = ?c.parent_id, "created comment");
            println!("created comment #{}", c.id);
        }
        Command::Delete { id, yes } => {
            let id = CommentId(id);
            if !yes && !confirm(&mut input, &delete_question(id)).await? {
                tracing::debug!(%id, "delete declined");
                return Ok(());
            }
            let d = gw.delete(id).await.context("failed to delete comment")?;
            tracing::info!(%id, deleted = d.deleted, "deleted comment");
            println!("deleted {} comment(s)", d.deleted);
        }
        Command::Shell => shell(&gw, &mut input).await?,
    }

    Ok(())
}

#[derive(Debug, Eq, PartialEq)]
enum Line {
    Intents(Vec<Intent>),
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
    show              redraw the current view
    page <n>          go to a page of root comments
    open <id>         show the replies to a comment
    back              go back to the root comments
    search [text]     filter root comments, no text clears the filter
    reply <id>        reply to a comment with the next post
    noreply           post the next comment as a new thread
    post <text>       post a comment
    delete <id>       delete a comment and its replies
    quit";

fn parse_id(arg: &str) -> Result<CommentId, String> {
    arg.parse()
        .map(CommentId)
        .map_err(|_| format!("not a comment id: {arg:?}"))
}

fn parse_line(line: &str) -> Result<Line, String> {
    let line = line.trim();
    let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();
    let intent = match cmd {
        "" | "show" => return Ok(Line::Show),
        "help" | "?" => return Ok(Line::Help),
        "quit" | "exit" => return Ok(Line::Quit),
        "page" => Intent::LoadPage(
            arg.parse()
                .map_err(|_| format!("not a page number: {arg:?}"))?,
        ),
        "open" => Intent::ExpandReplies(parse_id(arg)?),
        "back" => Intent::BackToRoot,
        "search" => Intent::Search(String::from(arg)),
        "reply" => Intent::MarkReplyTarget(parse_id(arg)?),
        "noreply" => Intent::ClearReplyTarget,
        "post" => {
            return Ok(Line::Intents(vec![
                Intent::EditContent(String::from(arg)),
                Intent::Create,
            ]))
        }
        "delete" => Intent::Delete(parse_id(arg)?),
        _ => return Err(format!("unknown command {cmd:?}, try `help`")),
    };
    Ok(Line::Intents(vec![intent]))
}

fn draw(ctl: &Controller) {
    let surface = ctl.surface();
    if let Some(root) = ctl.store().view().current_parent() {
        println!("Replies to #{root}:");
    }
    print!("{}", text::tree_to_text(&ctl.tree()));
    if let Some(pager) = ctl.pager() {
        println!("{}", text::pager_to_text(&pager));
    }
    if let Some(notice) = &surface.notice {
        println!("{notice}");
    }
    if let Some(error) = &surface.error {
        eprintln!("error: {error}");
    }
}

async fn shell(gw: &HttpGateway, input: &mut Input) -> anyhow::Result<()> {
    let mut ctl = Controller::new();
    let req = ctl.start();
    ctl.run(gw, Some(req)).await;
    draw(&ctl);

    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let line = match input.next_line().await? {
            Some(line) => line,
            None => return Ok(()),
        };
        let intents = match parse_line(&line) {
            Ok(Line::Intents(intents)) => intents,
            Ok(Line::Show) => Vec::new(),
            Ok(Line::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(Line::Quit) => return Ok(()),
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        for intent in intents {
            tracing::debug!(?intent, "dispatching");
            ctl.dispatch(gw, intent).await;
        }
        if let Some(id) = ctl.surface().pending_delete {
            let answer = match confirm(input, &delete_question(id)).await? {
                true => Intent::ConfirmDelete,
                false => Intent::CancelDelete,
            };
            ctl.dispatch(gw, answer).await;
        }
        draw(&ctl);
    }
}
