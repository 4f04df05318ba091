use std::env;
use std::fs;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use urihost::{BundledList, Encoding, Host, RuleList, SuffixRules};

/// Environment variable naming a Public Suffix List file to use instead of the bundled one.
const SUFFIX_LIST_VAR: &str = "URIHOST_SUFFIX_LIST";

/// Set up logging; `RUST_LOG=debug` shows classification and derivation events.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn load_rules() -> Box<dyn SuffixRules> {
    let path = match env::var(SUFFIX_LIST_VAR) {
        Ok(path) if !path.is_empty() => path,
        _ => return Box::new(BundledList),
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            let rules = RuleList::parse_icann(&text);
            info!(path = %path, rules = rules.len(), "using public suffix list file");
            Box::new(rules)
        }
        Err(err) => {
            warn!(path = %path, error = %err, "cannot read public suffix list, using bundled list");
            Box::new(BundledList)
        }
    }
}

fn show(raw: &str, rules: &dyn SuffixRules) -> Result<(), urihost::HostError> {
    let host = Host::parse(raw)?;

    println!("{}", raw);
    println!("  category:  {:?}", host.category());
    println!("  ascii:     {}", host.content(Encoding::Ascii).unwrap_or(""));
    println!("  unicode:   {}", host.content(Encoding::Unicode).unwrap_or(""));
    println!("  absolute:  {}", host.is_absolute());
    println!("  labels:    {:?}", host.label_list());

    if host.is_ip() {
        println!("  ip:        {}", host.ip().unwrap_or_default());
        println!("  version:   {}", host.ip_version().unwrap_or(""));
        if host.has_zone_identifier() {
            println!("  unscoped:  {}", host.without_zone_identifier()?);
        }
    }

    if host.is_domain() {
        let info = host.suffix_info(Some(rules));
        let mark = if info.is_valid_suffix { "✓" } else { "✗" };
        println!("  suffix:    {} {}", info.public_suffix.as_deref().unwrap_or("-"), mark);
        println!("  domain:    {}", info.registrable_domain.as_deref().unwrap_or("-"));
        println!("  subdomain: {}", info.sub_domain.as_deref().unwrap_or("-"));
    }

    Ok(())
}

fn main() {
    init_logging();

    let hosts: Vec<String> = env::args().skip(1).collect();
    if hosts.is_empty() {
        eprintln!("usage: urihost <host>...");
        eprintln!("  {}=<path> uses a Public Suffix List file", SUFFIX_LIST_VAR);
        process::exit(2);
    }

    let rules = load_rules();
    let mut failed = false;

    for raw in &hosts {
        if let Err(err) = show(raw, rules.as_ref()) {
            println!("{}", raw);
            println!("  ✗ {}", err);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}
