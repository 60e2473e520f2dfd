use anyhow::Context;
use rand::Rng;
use twig_client::{
    api::{CommentId, Gateway, NewComment},
    HttpGateway,
};

const COMMENT_WORD_COUNT: usize = 12;
const MAX_REPLIES: usize = 4;

/// Fill a comment service with random threads
#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(
        short,
        long,
        env = "TWIG_HOST",
        default_value = "http://localhost:8080"
    )]
    host: String,

    /// Number of root comments to create
    #[structopt(short, long, default_value = "25")]
    roots: usize,

    /// Depth of the deepest reply chain
    #[structopt(short, long, default_value = "3")]
    max_depth: usize,
}

fn gen_content(rng: &mut impl Rng) -> String {
    let words = rng.gen_range(1..=COMMENT_WORD_COUNT);
    lipsum::lipsum_words_with_rng(rng, words)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let gw = HttpGateway::new(opt.host);
    let mut rng = rand::thread_rng();

    // (parent, depth of the comment to create)
    let mut todo: Vec<(Option<CommentId>, usize)> = vec![(None, 0); opt.roots];
    let mut created = 0;
    while let Some((parent_id, depth)) = todo.pop() {
        let c = gw
            .create(&NewComment {
                content: gen_content(&mut rng),
                parent_id,
            })
            .await
            .with_context(|| format!("creating a reply to {parent_id:?}"))?;
        created += 1;
        if depth < opt.max_depth {
            let replies = rng.gen_range(0..=MAX_REPLIES);
            todo.extend(std::iter::repeat((Some(c.id), depth + 1)).take(replies));
        }
    }

    tracing::info!(created, "done generating test data");
    Ok(())
}
