mod app;

use anyhow::Result;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use sellerpro::config::Config;
use sellerpro::content::{
    advise_ads, generate_content, render_product_image, suggest_replies, write_video_script,
    ContentType, ImageStyle, ProductBrief, Tone,
};
use sellerpro::core::ads::{ad_breakeven, AdGoal, DEFAULT_CONVERSION_RATE_PERCENT};
use sellerpro::core::{compute, parse_decimal_or_zero, parse_optional_decimal};
use sellerpro::generation::ReferenceImage;
use sellerpro::models::{FeeField, PricingRequest, ProfitKind};
use sellerpro::planning::{check_plan, PlanUpdate, PromotionPlanner};
use sellerpro::report;

use crate::app::SellerApp;

const USAGE: &str = "\
Usage: sellerpro <command> [args]

  price <cost> <profit> [amount|percent] [packaging] [competitor]
  profit <cost> <selling_price> [packaging] [competitor]
  fees [show | set <field> <value> | vat <on|off> | reset]
  key <api_key>
  shop [text...]
  ads <price> <profit_per_unit> [conversion_%] [profit|sales|awareness]
  promo <target_profit> <name:cost:price>... [--days N] [--platform P] [--ask question...]
  content <listing|social> <product> [friendly|professional|urgent] [--category C] [--brand B] [--audience A] [features...]
  reply <customer message...>
  script <product...>
  image <minimalist|studio|luxury|nature> <product> [reference_image...]";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };
    let rest = &args[1..];

    let mut app = SellerApp::new(cfg);

    match command.as_str() {
        "price" => cmd_price(&app, rest),
        "profit" => cmd_profit(&app, rest),
        "fees" => cmd_fees(&mut app, rest)?,
        "key" => cmd_key(&mut app, rest)?,
        "shop" => cmd_shop(&mut app, rest)?,
        "ads" => cmd_ads(&app, rest).await,
        "promo" => cmd_promo(&app, rest).await,
        "content" => cmd_content(&app, rest).await,
        "reply" => cmd_reply(&app, rest).await,
        "script" => cmd_script(&app, rest).await,
        "image" => cmd_image(&app, rest).await?,
        _ => println!("{}", USAGE),
    }

    Ok(())
}

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map(String::as_str).unwrap_or("")
}

fn cmd_price(app: &SellerApp, args: &[String]) {
    let kind = args
        .get(2)
        .and_then(|s| ProfitKind::parse(s))
        .unwrap_or(ProfitKind::Amount);
    let request = PricingRequest::find_price(
        parse_decimal_or_zero(arg(args, 0)),
        parse_decimal_or_zero(arg(args, 3)),
        parse_decimal_or_zero(arg(args, 1)),
        kind,
    )
    .with_competitor(parse_optional_decimal(arg(args, 4)));
    run_pricing(app, &request);
}

fn cmd_profit(app: &SellerApp, args: &[String]) {
    let request = PricingRequest::check_profit(
        parse_decimal_or_zero(arg(args, 0)),
        parse_decimal_or_zero(arg(args, 2)),
        parse_decimal_or_zero(arg(args, 1)),
    )
    .with_competitor(parse_optional_decimal(arg(args, 3)));
    run_pricing(app, &request);
}

fn run_pricing(app: &SellerApp, request: &PricingRequest) {
    match compute(request, app.fees()) {
        Ok(result) => report::print_pricing(&result),
        Err(e) => println!("ERROR: {}", e),
    }
}

fn cmd_fees(app: &mut SellerApp, args: &[String]) -> Result<()> {
    match arg(args, 0) {
        "" | "show" => {}
        "set" => match FeeField::parse(arg(args, 1)) {
            Some(field) => app.set_fee(field, parse_decimal_or_zero(arg(args, 2)))?,
            None => {
                println!("Unknown fee field '{}' (commission, transaction, service, fixed)", arg(args, 1));
                return Ok(());
            }
        },
        "vat" => app.set_vat(matches!(arg(args, 1), "on" | "yes" | "true" | "1"))?,
        "reset" => app.reset_fees()?,
        other => {
            println!("Unknown fees action '{}'", other);
            return Ok(());
        }
    }
    report::print_fee_structure(app.fees());
    Ok(())
}

fn cmd_key(app: &mut SellerApp, args: &[String]) -> Result<()> {
    app.set_credential(arg(args, 0))?;
    println!("API key saved.");
    Ok(())
}

fn cmd_shop(app: &mut SellerApp, args: &[String]) -> Result<()> {
    if !args.is_empty() {
        app.set_shop_info(&args.join(" "))?;
    }
    let info = app.shop_info();
    println!("Shop info: {}", if info.is_empty() { "(not set)" } else { info.as_str() });
    Ok(())
}

async fn cmd_ads(app: &SellerApp, args: &[String]) {
    let price = parse_decimal_or_zero(arg(args, 0));
    let profit = parse_decimal_or_zero(arg(args, 1));
    let cr = parse_optional_decimal(arg(args, 2)).unwrap_or(DEFAULT_CONVERSION_RATE_PERCENT);
    report::print_ad_breakeven(&ad_breakeven(price, profit, cr), cr);

    let Some(goal) = args.get(3).and_then(|s| AdGoal::parse(s)) else {
        return;
    };
    match advise_ads(app.client(), &app.credential(), price, profit, cr, goal).await {
        Ok(advice) => println!("\n{}", advice),
        Err(e) => println!("\nAI advice unavailable: {}", e),
    }
}

async fn cmd_promo(app: &SellerApp, args: &[String]) {
    let mut planner = PromotionPlanner::new();
    planner.goal.target_total_profit = parse_optional_decimal(arg(args, 0));

    let mut question: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" => {
                planner.goal.duration_days = arg(args, i + 1).parse().unwrap_or(planner.goal.duration_days);
                i += 2;
            }
            "--platform" => {
                planner.goal.platform = arg(args, i + 1).to_string();
                i += 2;
            }
            "--ask" => {
                question = Some(args[i + 1..].join(" "));
                break;
            }
            item => {
                let parts: Vec<&str> = item.splitn(3, ':').collect();
                let (name, cost, price) = match parts.as_slice() {
                    [n, c, p] => (*n, *c, *p),
                    _ => (item, "", ""),
                };
                if planner.add_item(name, cost, price).is_none() {
                    warn!("Skipping '{}': expected name:cost:price", item);
                }
                i += 1;
            }
        }
    }

    report::print_portfolio(&planner.portfolio().summary());
    let credential = app.credential();

    match planner.generate_plan(app.client(), &credential).await {
        Ok(PlanUpdate::Applied) => {
            if let Some(plan) = planner.plan() {
                report::print_plan(plan);
                report::print_plan_check(&check_plan(plan, planner.portfolio(), app.fees()));
            }
        }
        Ok(PlanUpdate::Stale) => println!("Plan discarded: inputs changed while waiting."),
        Ok(PlanUpdate::NoResponse) => println!("No response from AI, try again."),
        Ok(PlanUpdate::Unparseable) => println!("AI response could not be read as a plan, try again."),
        Err(e) => println!("{}", e),
    }

    if let Some(q) = question {
        match planner.send_chat(app.client(), &credential, &q).await {
            Ok(reply) => println!("\n{}", reply.text),
            Err(e) => println!("\n{}", e),
        }
    }
}

/// `<listing|social> <product> [tone] [--category C] [--brand B] [--audience A] [features...]`
fn parse_brief(args: &[String]) -> Option<(ContentType, ProductBrief)> {
    let kind = ContentType::parse(arg(args, 0))?;
    let mut brief = ProductBrief {
        product_name: arg(args, 1).to_string(),
        ..ProductBrief::default()
    };

    let mut features = Vec::new();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--category" => {
                brief.category = arg(args, i + 1).to_string();
                i += 2;
            }
            "--brand" => {
                brief.brand = arg(args, i + 1).to_string();
                i += 2;
            }
            "--audience" => {
                brief.target_audience = arg(args, i + 1).to_string();
                i += 2;
            }
            word => {
                match Tone::parse(word) {
                    Some(tone) if i == 2 => brief.tone = tone,
                    _ => features.push(word),
                }
                i += 1;
            }
        }
    }
    brief.features = features.join(" ");
    Some((kind, brief))
}

async fn cmd_content(app: &SellerApp, args: &[String]) {
    let Some((kind, brief)) = parse_brief(args) else {
        println!("Content type must be 'listing' or 'social'");
        return;
    };

    match generate_content(app.client(), &app.credential(), kind, &brief, &app.shop_info()).await {
        Ok(content) => {
            println!("\n{}\n", content.title);
            println!("{}\n", content.description);
            println!("{}", content.hashtags);
        }
        Err(e) => println!("{}", e),
    }
}

async fn cmd_reply(app: &SellerApp, args: &[String]) {
    match suggest_replies(app.client(), &app.credential(), &args.join(" ")).await {
        Ok(replies) => {
            for (i, r) in replies.iter().enumerate() {
                println!("{}. {}", i + 1, r);
            }
        }
        Err(e) => println!("{}", e),
    }
}

async fn cmd_script(app: &SellerApp, args: &[String]) {
    match write_video_script(app.client(), &app.credential(), &args.join(" ")).await {
        Ok(script) => println!("{}", script),
        Err(e) => println!("{}", e),
    }
}

async fn cmd_image(app: &SellerApp, args: &[String]) -> Result<()> {
    let style = ImageStyle::parse(arg(args, 0)).unwrap_or_default();
    let mut references = Vec::new();
    for path in args.iter().skip(2) {
        let loaded = if path.starts_with("data:") {
            ReferenceImage::from_data_url(path)
        } else {
            ReferenceImage::from_path(Path::new(path))
        };
        match loaded {
            Ok(img) => references.push(img),
            Err(e) => warn!("Skipping reference {}: {:#}", path, e),
        }
    }

    match render_product_image(app.client(), &app.credential(), arg(args, 1), style, &references, true).await {
        Ok(bytes) => {
            let path = app.save_image(&bytes)?;
            println!("Image saved to {}", path.display());
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn brief_flags_fill_listing_fields() {
        let (kind, brief) = parse_brief(&args(
            "listing Mug professional --category Kitchen --brand Dao --audience baristas handmade 350ml",
        ))
        .unwrap();
        assert_eq!(kind, ContentType::Listing);
        assert_eq!(brief.product_name, "Mug");
        assert_eq!(brief.tone, Tone::Professional);
        assert_eq!(brief.category, "Kitchen");
        assert_eq!(brief.brand, "Dao");
        assert_eq!(brief.target_audience, "baristas");
        assert_eq!(brief.features, "handmade 350ml");
    }

    #[test]
    fn brief_without_flags_keeps_defaults() {
        let (kind, brief) = parse_brief(&args("social Mug cute gift")).unwrap();
        assert_eq!(kind, ContentType::Social);
        assert_eq!(brief.tone, Tone::Friendly);
        assert_eq!(brief.features, "cute gift");
        assert!(brief.category.is_empty());
        assert!(parse_brief(&args("poster Mug")).is_none());
    }
}
