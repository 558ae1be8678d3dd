//! Context command handlers

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::cli::{ConfigAction, SetContextArgs};
use crate::error::{NgsiError, Result};

use super::models::{Context, ContextConfig};
use super::store::ContextStore;

const NOT_SET: &str = "<not set>";

/// Dispatch context subcommands
pub fn run_context_command(action: &ConfigAction) -> Result<()> {
    let store = ContextStore::new();
    match action {
        ConfigAction::GetContexts => run_context_list(&store),
        ConfigAction::SetContext(args) => run_context_set(&store, args),
        ConfigAction::UseContext(args) => run_context_use(&store, &args.name),
        ConfigAction::DeleteContext(args) => run_context_delete(&store, &args.name),
        ConfigAction::CurrentContext => run_context_show(&store),
        ConfigAction::View => run_config_view(&store),
    }
}

fn not_found(name: &str, config: &ContextConfig) -> NgsiError {
    NgsiError::Config(format!(
        "Context '{}' not found. Available contexts: {}",
        name,
        config.contexts.keys().cloned().collect::<Vec<_>>().join(", ")
    ))
}

/// Render all contexts as a table
fn context_table(config: &ContextConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("CURRENT"),
            Cell::new("NAME"),
            Cell::new("HOST"),
            Cell::new("NGSI-TYPE"),
            Cell::new("TENANT"),
            Cell::new("SCOPE"),
            Cell::new("AUTH"),
        ]);

    for (name, ctx) in &config.contexts {
        let is_current = config.current_context.as_deref() == Some(name.as_str());
        table.add_row(vec![
            Cell::new(if is_current { "*" } else { "" }),
            Cell::new(name),
            Cell::new(&ctx.host),
            Cell::new(ctx.ngsi_type),
            Cell::new(ctx.tenant.as_deref().unwrap_or(NOT_SET)),
            Cell::new(ctx.scope.as_deref().unwrap_or(NOT_SET)),
            Cell::new(auth_summary(ctx)),
        ]);
    }
    table
}

fn run_context_list(store: &ContextStore) -> Result<()> {
    let config = store.load()?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("\nUse 'ngsictl config set-context <name> --host <host>' to create one.");
        return Ok(());
    }

    println!("{}", context_table(&config));
    Ok(())
}

fn run_context_show(store: &ContextStore) -> Result<()> {
    let config = store.load()?;

    let current_name = config.current_context.as_ref().ok_or_else(|| {
        NgsiError::Config(
            "No current context set. Use 'ngsictl config use-context <name>' to set one."
                .to_string(),
        )
    })?;
    let ctx = config
        .contexts
        .get(current_name)
        .ok_or_else(|| not_found(current_name, &config))?;

    println!("Current context: {}", current_name);
    println!("  Host:        {}", ctx.host);
    println!("  NGSI type:   {}", ctx.ngsi_type);
    println!("  Tenant:      {}", ctx.tenant.as_deref().unwrap_or(NOT_SET));
    println!("  Scope:       {}", ctx.scope.as_deref().unwrap_or(NOT_SET));
    println!("  Auth:        {}", auth_summary(ctx));
    println!("  Safe string: {}", if ctx.safe_string { "on" } else { "off" });
    Ok(())
}

/// Merge provided fields into an existing context
fn apply_args(ctx: &mut Context, args: &SetContextArgs) {
    if let Some(host) = &args.host {
        ctx.host = host.clone();
    }
    if let Some(ngsi_type) = args.ngsi_type {
        ctx.ngsi_type = ngsi_type;
    }
    if args.token.is_some() {
        ctx.token = args.token.clone();
    }
    if args.tenant.is_some() {
        ctx.tenant = args.tenant.clone();
    }
    if args.scope.is_some() {
        ctx.scope = args.scope.clone();
    }
    if args.user.is_some() {
        ctx.user = args.user.clone();
    }
    if args.password.is_some() {
        ctx.password = args.password.clone();
    }
    if let Some(safe_string) = args.safe_string {
        ctx.safe_string = safe_string.is_on();
    }
}

fn run_context_set(store: &ContextStore, args: &SetContextArgs) -> Result<()> {
    let mut config = store.load()?;

    if let Some(existing) = config.contexts.get_mut(&args.name) {
        apply_args(existing, args);
        store.save(&config)?;
        println!("✓ Updated context '{}'", args.name);
        return Ok(());
    }

    let host = args.host.as_ref().ok_or_else(|| {
        NgsiError::Config(format!(
            "--host is required when creating a new context. Usage:\n  \
             ngsictl config set-context {} --host <HOST> [--ngsi-type v2|ld] [--token <TOKEN>]",
            args.name
        ))
    })?;

    let mut ctx = Context::new(host);
    apply_args(&mut ctx, args);
    config.contexts.insert(args.name.clone(), ctx);

    // First context becomes current
    if config.contexts.len() == 1 {
        config.current_context = Some(args.name.clone());
    }

    store.save(&config)?;
    println!("✓ Created context '{}'", args.name);
    Ok(())
}

fn run_context_use(store: &ContextStore, name: &str) -> Result<()> {
    let mut config = store.load()?;

    if !config.contexts.contains_key(name) {
        return Err(not_found(name, &config));
    }

    config.current_context = Some(name.to_string());
    store.save(&config)?;
    println!("✓ Switched to context '{}'", name);
    Ok(())
}

fn run_context_delete(store: &ContextStore, name: &str) -> Result<()> {
    let mut config = store.load()?;

    if config.contexts.remove(name).is_none() {
        return Err(not_found(name, &config));
    }
    if config.current_context.as_deref() == Some(name) {
        config.current_context = None;
    }

    store.save(&config)?;
    println!("✓ Deleted context '{}'", name);
    Ok(())
}

/// Print the config file with secrets masked
fn run_config_view(store: &ContextStore) -> Result<()> {
    let mut config = store.load()?;
    for ctx in config.contexts.values_mut() {
        ctx.token = ctx.token.as_deref().map(|t| mask_secret(Some(t)));
        ctx.password = ctx.password.as_deref().map(|p| mask_secret(Some(p)));
    }
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| NgsiError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// How requests made with this context authenticate
fn auth_summary(ctx: &Context) -> String {
    match (&ctx.user, &ctx.token) {
        (Some(user), _) => format!("basic ({})", user),
        (None, Some(token)) => format!("token {}", mask_secret(Some(token))),
        (None, None) => NOT_SET.to_string(),
    }
}

/// Mask a secret for display, keeping the last 4 characters
fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        Some(s) if s.chars().count() >= 4 => {
            let tail: String = s.chars().skip(s.chars().count() - 4).collect();
            format!("****{}", tail)
        }
        Some(_) => "****".to_string(),
        None => NOT_SET.to_string(),
    }
}
