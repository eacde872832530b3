use anyhow::{bail, Result};
use colored::*;
use todo_client::TaskService;
use todo_core::{Action, Task, TaskId};

// Unlike the screen, one-shot commands report failures through the exit status.

pub async fn list(service: &TaskService) -> Result<()> {
    let tasks = service.list_tasks().await?;
    print_tasks(&tasks);
    Ok(())
}

pub async fn add(service: &TaskService, words: &[String]) -> Result<()> {
    let text = words.join(" ");
    if Action::add_from_input(&text).is_none() {
        bail!("task text is empty");
    }
    match service.add_task(&text).await? {
        Some(task) => println!("{} {}", "Added".green().bold(), format!("#{}", task.id).cyan()),
        None => println!("{}", "Added".green().bold()),
    }
    list(service).await
}

pub async fn set_completion(service: &TaskService, id: TaskId, completed: bool) -> Result<()> {
    match service.set_completion(id, completed).await? {
        Some(_) if completed => println!("{} {}", "Completed".green().bold(), format!("#{id}").cyan()),
        Some(_) => println!("{} {}", "Reopened".yellow().bold(), format!("#{id}").cyan()),
        None => println!("{}", format!("No task #{id}").dimmed()),
    }
    list(service).await
}

pub async fn delete(service: &TaskService, id: TaskId) -> Result<()> {
    let receipt = service.delete_task(id).await?;
    if receipt.affected == 0 {
        println!("{}", format!("No task #{id}").dimmed());
    } else {
        println!("{} {}", "Deleted".red().bold(), format!("#{id}").cyan());
    }
    list(service).await
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks yet.".dimmed());
        return;
    }
    for task in tasks {
        println!("{}", format_task(task));
    }
}

fn format_task(task: &Task) -> String {
    let id = format!("{:>4}", task.id).cyan();
    if task.completed {
        format!("{id} {} {}", "✔".green(), task.task.strikethrough().dimmed())
    } else {
        format!("{id} {} {}", "•".normal(), task.task.bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_task_marks_completion() {
        colored::control::set_override(false);
        let open = Task {
            id: 1,
            task: "Buy milk".to_string(),
            completed: false,
        };
        let done = Task {
            completed: true,
            ..open.clone()
        };

        assert_eq!(format_task(&open), "   1 • Buy milk");
        assert_eq!(format_task(&done), "   1 ✔ Buy milk");
    }
}
