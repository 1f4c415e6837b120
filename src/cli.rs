use clap::{Parser, Subcommand};
use inquire::Text;

use wellnessCalendar::app_state::AppState;
use wellnessCalendar::events::queue::AppEvent;
use wellnessCalendar::models::event::{Category, EventDraft};
use wellnessCalendar::models::time_block::format_day;
use wellnessCalendar::service::day_listing::ListingRow;

#[derive(Parser)]
#[command(about = "Life Wellness Calendar (terminal mode)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one day's events and weather
    List {
        /// Day as M/D/YY, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    Add {
        #[arg(long)]
        date: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        start: String,
        #[arg(long, default_value = "")]
        end: String,
        /// Spiritual, Physical, Emotional or Intellectual; guessed from the title if omitted
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Talk to the calendar assistant
    Chat {},
}

pub async fn cli(mut state: AppState) {
    // Fine to exit here on bad arguments
    let cli = Cli::parse();
    match &cli.command {
        Commands::List { date } => {
            let date = date.clone().unwrap_or_else(|| format_day(state.today()));
            state.select_date(&date);
            print_day(&state);
            wait_for_weather(&mut state).await;
            println!("\n{}", state.weather_text());
        }
        Commands::Add {
            date,
            title,
            start,
            end,
            category,
        } => {
            let category = match category {
                Some(name) => Category::from_name(name),
                None => Category::infer(title),
            };
            let draft = EventDraft {
                event: title.clone(),
                start_time: start.clone(),
                end_time: end.clone(),
                category,
            };
            let draft = match draft.validated() {
                Ok(draft) => draft,
                Err(message) => {
                    println!("{}", message);
                    return;
                }
            };
            match state.add_event(date, draft) {
                Ok(id) => println!("Added event {} on {}", id, date),
                Err(e) => println!("Failed to add event: {}", e),
            }
        }
        Commands::Delete { id } => match state.delete_event(id) {
            Ok(Some(record)) => println!("Deleted {} on {}", record.event, record.date),
            Ok(None) => println!("No event with id {}", id),
            Err(e) => println!("Failed to delete event: {}", e),
        },
        Commands::Chat {} => chat(&mut state).await,
    }
}

fn print_day(state: &AppState) {
    println!("Events for {}", state.selected_date());
    let rows = state.day_listing();
    if rows.is_empty() {
        println!("  (none)");
    }
    for row in rows {
        match row {
            ListingRow::Header(block) => println!("{}", block.heading()),
            ListingRow::Entry { id, text, category } => {
                println!("   {} [{}] ({})", text, category, id)
            }
        }
    }
}

async fn wait_for_weather(state: &mut AppState) {
    while let Some(event) = state.next_event().await {
        let current = matches!(&event, AppEvent::WeatherReady { date, .. } if date == state.selected_date());
        let _ = state.apply_event(event);
        if current {
            break;
        }
    }
}

async fn chat(state: &mut AppState) {
    print_new_lines(state, 0);
    loop {
        let seen = state.chat().lines().len();
        let input = match Text::new("You:").prompt() {
            Ok(text) => text,
            Err(_) => break,
        };
        if input.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        if !state.send_chat(&input) {
            continue;
        }
        while state.chat_busy() {
            let Some(event) = state.next_event().await else {
                return;
            };
            if let Err(e) = state.apply_event(event) {
                println!("Failed to save event: {}", e);
            }
        }
        // skip the echoed user line
        print_new_lines(state, seen + 1);
    }
}

fn print_new_lines(state: &AppState, from: usize) {
    for line in state.chat().lines().iter().skip(from) {
        println!("{}: {}\n", line.speaker.label(), line.text);
    }
}
