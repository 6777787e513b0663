//! Terminal dashboard: reads lines from stdin and talks to the endpoint.

use tokio::io::{AsyncBufReadExt, BufReader};
use waypoint_dashboard::{Dashboard, PlanTransport, render};

const HELP: &str = "Commands: /goal <text> sets the goal, /plan shows the plan, /quit exits. \
                    Anything else is sent to the agent.";

/// What a line of input asks for
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Goal(&'a str),
    ShowPlan,
    Help,
    Quit,
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed == "/goal" {
        return Input::Goal("");
    }
    if let Some(goal) = trimmed.strip_prefix("/goal ") {
        return Input::Goal(goal.trim());
    }
    match trimmed {
        "/plan" => Input::ShowPlan,
        "/help" => Input::Help,
        "/quit" | "/exit" => Input::Quit,
        _ => Input::Message(line),
    }
}

/// Run the interactive loop until EOF or `/quit`
pub async fn run(dashboard: &mut Dashboard, transport: &dyn PlanTransport) -> anyhow::Result<()> {
    println!("{}", render::render_header(dashboard));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Goal("") => println!("Goal: {}", dashboard.goal()),
            Input::Goal(goal) => {
                dashboard.set_goal(goal);
                println!("Goal set: {}", goal);
            }
            Input::ShowPlan => match dashboard.agent_state() {
                Some(state) => println!("{}", render::render_plan(state)),
                None => println!("No plan yet. Send a message first."),
            },
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Message(text) => {
                if !dashboard.can_send() {
                    continue;
                }
                dashboard.set_draft(text);
                if dashboard.send_draft(transport).await {
                    if let Some(message) = dashboard.messages().last() {
                        println!("\n{}\n", render::render_message(message));
                    }
                    if let Some(state) = dashboard.agent_state() {
                        println!("{}", render::render_plan(state));
                    }
                } else if dashboard.error().is_some() {
                    print!("{}", render::render_header(dashboard));
                }
            }
        }
    }
    Ok(())
}
