//! # Command Line
//!
//! Subcommands stand in for the form buttons; `--id` is the selected row.
//!
//! ```text
//! depot product add --name Widget --category-id 1 --supplier-id 1 \
//!                   --cost 2.00 --price 5.00 --reorder-level 10
//! depot product stock-in --id 1 --quantity 5
//! depot supplier delete --id 3
//! depot --json low-stock
//! ```
//!
//! Update commands start from the selected record and overwrite only the
//! fields given on the command line, then re-apply the whole form.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use depot_core::forms::{CategoryForm, ProductForm, Selection, SupplierForm};
use depot_core::stock::StockForm;

use crate::commands;
use crate::error::Alert;
use crate::state::{AppConfig, DbState};
use crate::view::{Focus, Output};

#[derive(Debug, Parser)]
#[command(name = "depot", author, version, about = "Inventory: products, suppliers, categories and stock movements", long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file (overrides depot.toml and DEPOT_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file (default: depot.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Manage products and move stock")]
    Product(ProductCommand),
    #[command(subcommand, about = "Manage suppliers")]
    Supplier(SupplierCommand),
    #[command(subcommand, about = "Manage categories")]
    Category(CategoryCommand),
    #[command(about = "List products at or below their reorder level")]
    LowStock,
    #[command(about = "List stock transactions, newest first")]
    Transactions(TransactionsArgs),
    #[command(about = "Compare stored stock with the transaction ledger")]
    Audit,
    #[command(about = "Show database health and migration status")]
    Status,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    #[command(about = "List all products")]
    List,
    #[command(about = "Add a product (stock starts at 0)")]
    Add(ProductFields),
    #[command(about = "Update the selected product")]
    Update {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        fields: ProductFields,
    },
    #[command(about = "Delete the selected product and its transactions")]
    Delete(SelectionArgs),
    #[command(about = "Receive stock for the selected product")]
    StockIn(StockArgs),
    #[command(about = "Issue stock for the selected product")]
    StockOut(StockArgs),
    #[command(about = "Show the selected product's transactions")]
    History(SelectionArgs),
}

#[derive(Debug, Subcommand)]
pub enum SupplierCommand {
    #[command(about = "List all suppliers")]
    List,
    #[command(about = "Add a supplier")]
    Add(SupplierFields),
    #[command(about = "Update the selected supplier")]
    Update {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        fields: SupplierFields,
    },
    #[command(about = "Delete the selected supplier")]
    Delete(SelectionArgs),
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    #[command(about = "List all categories")]
    List,
    #[command(about = "Add a category")]
    Add(CategoryFields),
    #[command(about = "Update the selected category")]
    Update {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        fields: CategoryFields,
    },
    #[command(about = "Delete the selected category")]
    Delete(SelectionArgs),
}

/// The selected row.
#[derive(Debug, Clone, Copy, Args)]
pub struct SelectionArgs {
    /// Id of the selected record
    #[arg(long)]
    pub id: Option<i64>,
}

impl From<SelectionArgs> for Selection {
    fn from(args: SelectionArgs) -> Self {
        Selection::from(args.id)
    }
}

/// Product form fields. Values are kept as typed and parsed by the command.
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub category_id: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub supplier_id: Option<String>,
    /// Cost price, e.g. 2.00
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,
    /// Selling price, e.g. 5.00
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub reorder_level: Option<String>,
}

impl ProductFields {
    /// Overwrites the fields of `base` that were given.
    pub fn merge_into(self, mut base: ProductForm) -> ProductForm {
        overwrite(&mut base.name, self.name);
        overwrite(&mut base.description, self.description);
        overwrite(&mut base.category_id, self.category_id);
        overwrite(&mut base.supplier_id, self.supplier_id);
        overwrite(&mut base.cost_price, self.cost);
        overwrite(&mut base.selling_price, self.price);
        overwrite(&mut base.reorder_level, self.reorder_level);
        base
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SupplierFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl SupplierFields {
    pub fn merge_into(self, mut base: SupplierForm) -> SupplierForm {
        overwrite(&mut base.name, self.name);
        overwrite(&mut base.contact_person, self.contact_person);
        overwrite(&mut base.phone, self.phone);
        overwrite(&mut base.email, self.email);
        overwrite(&mut base.address, self.address);
        base
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl CategoryFields {
    pub fn merge_into(self, mut base: CategoryForm) -> CategoryForm {
        overwrite(&mut base.name, self.name);
        overwrite(&mut base.description, self.description);
        base
    }
}

#[derive(Debug, Clone, Args)]
pub struct StockArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Units to move (must be > 0)
    #[arg(long, short, default_value = "", allow_hyphen_values = true)]
    pub quantity: String,
    /// Remarks; defaults to "Stock In" / "Stock Out"
    #[arg(long, short)]
    pub remarks: Option<String>,
}

impl From<StockArgs> for StockForm {
    fn from(args: StockArgs) -> Self {
        StockForm {
            quantity: args.quantity,
            remarks: args.remarks,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TransactionsArgs {
    /// Only this product's transactions
    #[arg(long)]
    pub product: Option<i64>,
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Runs one subcommand against the database.
pub async fn execute(command: Commands, db: &DbState, config: &AppConfig) -> Result<Output, Alert> {
    match command {
        Commands::Product(cmd) => product(cmd, db, config).await,
        Commands::Supplier(cmd) => supplier(cmd, db, config).await,
        Commands::Category(cmd) => category(cmd, db, config).await,
        Commands::LowStock => Ok(Output::Products(commands::low_stock(db).await?)),
        Commands::Transactions(args) => {
            let transactions = match args.product {
                Some(id) => commands::transaction_history(db, Selection::of(id)).await?,
                None => commands::all_transactions(db).await?,
            };
            Ok(Output::Transactions(transactions))
        }
        Commands::Audit => Ok(Output::Drift(commands::audit(db).await?)),
        Commands::Status => Ok(Output::Status(commands::status(db).await?)),
    }
}

fn refreshed(focus: Focus, refresh: commands::Refresh) -> Output {
    Output::Refreshed { focus, refresh }
}

async fn product(cmd: ProductCommand, db: &DbState, config: &AppConfig) -> Result<Output, Alert> {
    let refresh = match cmd {
        ProductCommand::List => {
            return Ok(refreshed(Focus::Products, commands::refresh_all(db, config).await?))
        }
        ProductCommand::History(selection) => {
            let history = commands::transaction_history(db, selection.into()).await?;
            return Ok(Output::Transactions(history));
        }
        ProductCommand::Add(fields) => {
            let form = fields.merge_into(ProductForm::default());
            commands::add_product(db, config, &form).await?
        }
        ProductCommand::Update { selection, fields } => {
            let selection = Selection::from(selection);
            let base = commands::product_form(db, selection).await?.unwrap_or_default();
            let form = fields.merge_into(base);
            commands::update_product(db, config, selection, &form).await?
        }
        ProductCommand::Delete(selection) => {
            commands::delete_product(db, config, selection.into()).await?
        }
        ProductCommand::StockIn(args) => {
            let selection = Selection::from(args.selection);
            commands::stock_in(db, config, selection, &args.into()).await?
        }
        ProductCommand::StockOut(args) => {
            let selection = Selection::from(args.selection);
            commands::stock_out(db, config, selection, &args.into()).await?
        }
    };
    Ok(refreshed(Focus::Products, refresh))
}

async fn supplier(cmd: SupplierCommand, db: &DbState, config: &AppConfig) -> Result<Output, Alert> {
    let refresh = match cmd {
        SupplierCommand::List => commands::refresh_all(db, config).await?,
        SupplierCommand::Add(fields) => {
            let form = fields.merge_into(SupplierForm::default());
            commands::add_supplier(db, config, &form).await?
        }
        SupplierCommand::Update { selection, fields } => {
            let selection = Selection::from(selection);
            let base = commands::supplier_form(db, selection).await?.unwrap_or_default();
            commands::update_supplier(db, config, selection, &fields.merge_into(base)).await?
        }
        SupplierCommand::Delete(selection) => {
            commands::delete_supplier(db, config, selection.into()).await?
        }
    };
    Ok(refreshed(Focus::Suppliers, refresh))
}

async fn category(cmd: CategoryCommand, db: &DbState, config: &AppConfig) -> Result<Output, Alert> {
    let refresh = match cmd {
        CategoryCommand::List => commands::refresh_all(db, config).await?,
        CategoryCommand::Add(fields) => {
            let form = fields.merge_into(CategoryForm::default());
            commands::add_category(db, config, &form).await?
        }
        CategoryCommand::Update { selection, fields } => {
            let selection = Selection::from(selection);
            let base = commands::category_form(db, selection).await?.unwrap_or_default();
            commands::update_category(db, config, selection, &fields.merge_into(base)).await?
        }
        CategoryCommand::Delete(selection) => {
            commands::delete_category(db, config, selection.into()).await?
        }
    };
    Ok(refreshed(Focus::Categories, refresh))
}
