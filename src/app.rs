use std::io::{self, Write};

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};

use crate::{
    cli::{Cli, Command},
    domain::{self, expert::Expert},
    infra,
    ui::{self, lookup::resolve_expert, render},
    usecases::{
        self, bootstrap,
        book_session::{quote_session, BookingRequest},
        context::AppContext,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let mut context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Chat { expert } => {
            let expert = resolve_expert(&context.store, &expert)?.clone();
            ui::console::run_chat_session(&mut context, &expert)
        }
        command => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            execute(&context, command, Utc::now(), &mut out)
        }
    }
}

fn execute(
    context: &AppContext,
    command: Command,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let store = &context.store;

    let lines = match command {
        Command::Chats => render::chat_rows(store.chats(), now),
        Command::Experts { query } => {
            render::expert_table(&store.search_experts(query.as_deref().unwrap_or_default()))
        }
        Command::Featured { limit } => {
            let limit = limit.unwrap_or(context.config.catalog.featured_limit);
            let featured: Vec<&Expert> = store.featured_experts(limit).iter().collect();
            render::expert_table(&featured)
        }
        Command::Show { expert } => render::expert_detail(resolve_expert(store, &expert)?),
        Command::Book {
            expert,
            minutes,
            at,
        } => {
            let expert = resolve_expert(store, &expert)?;
            let request = BookingRequest {
                start: at.unwrap_or(now + Duration::hours(1)),
                duration_minutes: minutes,
            };
            let quote = quote_session(expert, request, now)?;

            tracing::info!(
                expert_id = %quote.expert_id,
                minutes = quote.duration_minutes,
                total = quote.total,
                "session quoted"
            );

            vec![format!(
                "{} min with {} on {} for {}",
                quote.duration_minutes,
                expert.name,
                quote.start.format("%Y-%m-%d %H:%M UTC"),
                quote.total_label()
            )]
        }
        Command::Chat { .. } => bail!("chat sessions need an interactive terminal"),
    };

    for line in lines {
        writeln!(out, "{line}")?;
    }

    Ok(())
}
