use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::time::Duration;
use tradewinds::{ApiClient, Config, HttpClient, ListQuery, TtlCache};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "tradewinds")]
#[command(about = "Probe the Tradewinds storefront API from the command line")]
#[command(version)]
struct Args {
  /// Base URL of the API (default: $TRADEWINDS_API_URL or the local dev server)
  #[arg(long)]
  base_url: Option<String>,

  /// Per-request timeout in milliseconds
  #[arg(long)]
  timeout_ms: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch the home-page bundle
  Home,
  /// List products
  Products {
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
  },
  /// Fetch one product by slug
  Product { slug: String },
  /// List categories
  Categories,
  /// List the products of one category
  CategoryProducts { slug: String },
  /// List blog posts
  Blogs {
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
  },
  /// Fetch one blog post by slug
  Blog { slug: String },
  /// List reviews
  Reviews {
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
  },
  /// Fetch aggregate review statistics
  ReviewStats,
  /// List the comments of a blog post
  Comments { id: String },
  /// Like a blog post and print the updated count
  Like { id: String },
  /// Fetch the web-push public key
  PushKey,
  /// Fetch the visitor summary metrics
  VisitorsSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let subscriber = FmtSubscriber::builder()
    .with_env_filter(EnvFilter::from_default_env())
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let args = Args::parse();

  let config = match args.base_url {
    Some(base_url) => Config::new(base_url),
    None => Config::from_env(),
  };

  let mut http = HttpClient::new(&config)?;
  if let Some(ms) = args.timeout_ms {
    http = http.with_timeout(Duration::from_millis(ms));
  }
  let client = ApiClient::with_cache(http, TtlCache::new());

  match args.command {
    Command::Home => print_json(&client.get_home().await?)?,
    Command::Products { q, category, limit } => {
      let query = ListQuery { q, category, limit };
      print_json(&client.get_products(&query).await?)?;
    }
    Command::Product { slug } => print_json(&client.get_product(&slug).await?)?,
    Command::Categories => print_json(&client.get_categories().await?)?,
    Command::CategoryProducts { slug } => {
      print_json(&client.get_category_products(&slug).await?)?;
    }
    Command::Blogs { q, limit } => {
      let query = ListQuery {
        q,
        limit,
        ..ListQuery::default()
      };
      print_json(&client.get_blogs(&query).await?)?;
    }
    Command::Blog { slug } => print_json(&client.get_blog(&slug).await?)?,
    Command::Reviews { q, limit } => {
      let query = ListQuery {
        q,
        limit,
        ..ListQuery::default()
      };
      print_json(&client.get_reviews(&query).await?)?;
    }
    Command::ReviewStats => print_json(&client.get_review_stats().await?)?,
    Command::Comments { id } => print_json(&client.get_comments(&id).await?)?,
    Command::Like { id } => print_json(&client.like_blog(&id).await?)?,
    Command::PushKey => print_json(&client.get_push_public_key().await?)?,
    Command::VisitorsSummary => print_json(&client.get_visitors_summary().await?)?,
  }

  Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
