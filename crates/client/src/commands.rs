use engine::{
    Amount, Category, DashboardView, EngineError, ExpenseDraft, ExpenseId, FilterCriteria,
    format_date, parse_date, today_in,
};

use expense_tracker::{
    AppConfig, AppError, ExpenseClient, Result, Session, SyncController,
    args::{Command, EditFields, ExpenseFields},
};

pub async fn run(command: Command, config: AppConfig) -> Result<()> {
    let session = Session::init(&config.session_path);

    match command {
        Command::Login { token } => {
            session.set_token(token);
            println!("Token stored in {}.", config.session_path);
        }
        Command::Logout => {
            session.clear();
            println!("Logged out.");
        }
        Command::List {
            category,
            date,
            json,
        } => {
            let criteria = FilterCriteria {
                category: category.as_deref().map(str::parse::<Category>).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let mut controller = connect(&config, session).await?;
            controller.set_filters(criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(controller.view())?);
            } else {
                print_view(controller.view());
            }
        }
        Command::Add(fields) => {
            let draft = new_draft(&fields, &config)?;
            let mut controller = connect(&config, session).await?;
            let created = controller.add(&draft).await?;
            println!("Added {} ({}).", created.id, created.description);
        }
        Command::Edit { id, fields } => {
            let id = ExpenseId::new(id);
            let mut controller = connect(&config, session).await?;
            let current = open_edit(&mut controller, &id)?;
            let draft = merge_draft(current, &fields)?;
            let updated = controller.save_edit(&draft).await?;
            println!("Updated {} ({}).", updated.id, updated.description);
        }
        Command::Delete { id } => {
            let id = ExpenseId::new(id);
            let mut controller = connect(&config, session).await?;
            controller.delete(&id).await?;
            println!("Deleted {id}.");
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig, session: Session) -> Result<SyncController> {
    let client = ExpenseClient::new(config, session.clone())?;
    let mut controller = SyncController::new(client, session, config.mutation_sync);
    controller.activate().await?;
    Ok(controller)
}

fn new_draft(fields: &ExpenseFields, config: &AppConfig) -> Result<ExpenseDraft> {
    let today = format_date(today_in(config.tz()?));
    Ok(ExpenseDraft::parse(
        &fields.amount,
        &fields.category,
        &fields.description,
        fields.date.as_deref().unwrap_or(&today),
    )?)
}

fn open_edit(controller: &mut SyncController, id: &ExpenseId) -> Result<ExpenseDraft> {
    controller.begin_edit(id).ok_or_else(|| {
        AppError::Input(EngineError::InvalidInput(format!("no expense with id {id}")))
    })
}

fn merge_draft(mut draft: ExpenseDraft, fields: &EditFields) -> Result<ExpenseDraft> {
    if let Some(amount) = &fields.amount {
        draft.amount = amount.parse::<Amount>()?.value();
    }
    if let Some(category) = &fields.category {
        draft.category = Some(category.parse::<Category>()?);
    }
    if let Some(description) = &fields.description {
        draft.description = description.clone();
    }
    if let Some(date) = &fields.date {
        draft.date = Some(parse_date(date)?);
    }
    Ok(draft)
}

fn print_view(view: &DashboardView) {
    println!("Total Expense: {}", view.total_expense);
    if view.criteria_active {
        println!("Filtered Total: {}", view.filtered_total);
    }
    println!();

    println!(
        "{:<26} {:<10} {:>10}  {:<24} Description",
        "Id", "Date", "Amount", "Category"
    );
    for expense in &view.filtered {
        println!(
            "{:<26} {:<10} {:>10}  {:<24} {}",
            expense.id,
            format_date(expense.date),
            expense.amount.to_string(),
            expense.category.as_str(),
            expense.description
        );
    }

    if view.chart.is_empty() {
        return;
    }
    println!();
    println!("By category:");
    for slice in &view.chart {
        println!(
            "  {:<24} {:>10}  {:>5.1}%",
            slice.category.as_str(),
            slice.amount.to_string(),
            slice.share * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use expense_tracker::MutationSync;

    use super::*;

    fn controller() -> SyncController {
        let session = Session::in_memory();
        let client = ExpenseClient::new(&AppConfig::default(), session.clone()).unwrap();
        SyncController::new(client, session, MutationSync::Splice)
    }

    #[test]
    fn editing_an_unknown_id_is_an_error() {
        let mut controller = controller();
        let err = open_edit(&mut controller, &ExpenseId::new("missing")).unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        assert!(err.to_string().contains("missing"));
        assert!(controller.editing().is_none());
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let current = ExpenseDraft::parse("12.50", "Basic", "bread", "2024-01-05").unwrap();
        let fields = EditFields {
            amount: Some("13".to_string()),
            category: None,
            description: None,
            date: None,
        };
        let merged = merge_draft(current, &fields).unwrap();
        assert_eq!(merged.amount, 13.0);
        assert_eq!(merged.category, Some(Category::Basic));
        assert_eq!(merged.description, "bread");
        assert_eq!(format_date(merged.date.unwrap()), "2024-01-05");
    }
}
