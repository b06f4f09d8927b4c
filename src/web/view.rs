use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::error::TrailFinderError;
use crate::models::{Difficulty, SearchResponse, TrailResult};

const MAIN_CSS_URL: &str = "/css/main.css";
const MAP_JS_URL: &str = "/js/map.js";
const MAPS_API_URL: &str = "https://maps.googleapis.com/maps/api/js";

fn page(title: &str, head: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(MAIN_CSS_URL);
                @if let Some(head) = head {
                    (head)
                }
            }
            body {
                header {
                    a href="/" { "TrailFinder" }
                }
                main { (content) }
            }
        }
    }
}

fn flash_msg(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message {
            div class="flash" { (msg) }
        }
    }
}

pub fn homepage(message: Option<&str>) -> Markup {
    page(
        "Find hiking trails",
        None,
        html! {
            (flash_msg(message))
            h1 { "Find hiking trails near you" }
            form action="/show-trails" method="get" {
                label for="zipcode" { "Address or zip code" }
                input id="zipcode" type="text" name="zipcode" required;
                label for="radius" { "Distance (miles)" }
                input id="radius" type="number" name="radius" min="1" max="199" value="25" required;
                input type="submit" value="Search";
            }
        },
    )
}

pub fn show_trails(response: &SearchResponse, maps_api_key: &str) -> Markup {
    let maps_src = format!(
        "{MAPS_API_URL}?key={}&callback=initMap",
        urlencoding::encode(maps_api_key)
    );
    let noun = if response.count == 1 { "trail" } else { "trails" };
    let head = html! {
        script src=(MAP_JS_URL) {}
        script src=(maps_src) defer {}
    };

    page(
        "Trails near you",
        Some(head),
        html! {
            h1 {
                (response.count) " " (noun) " within " (response.radius) " miles"
            }
            div id="map"
                data-lat=(response.location.latitude)
                data-lng=(response.location.longitude) {}
            @if response.trails.is_empty() {
                p { "No trails found. Try a larger distance." }
            }
            ol class="trails" {
                @for trail in &response.trails {
                    (trail_item(trail))
                }
            }
            (difficulty_legend())
            script id="trail-data" type="application/json" {
                (PreEscaped(escape_script_json(&response.raw_json)))
            }
        },
    )
}

fn trail_item(trail: &TrailResult) -> Markup {
    html! {
        li class="trail" {
            h2 {
                @if let Some(url) = trail.url() {
                    a href=(url) { (trail.name()) }
                } @else {
                    (trail.name())
                }
            }
            @if let Some(location) = trail.location() {
                p class="location" { (location) }
            }
            @if let Some(summary) = trail.summary() {
                p class="summary" { (summary) }
            }
            dl {
                dt { "Difficulty" }
                dd { (trail.difficulty_label()) }
                @if let Some(length) = trail.length() {
                    dt { "Length" }
                    dd { (format!("{length:.1} mi")) }
                }
                @if let Some(ascent) = trail.ascent() {
                    dt { "Ascent" }
                    dd { (format!("{ascent:.0} ft")) }
                }
                @if let Some(descent) = trail.descent() {
                    dt { "Descent" }
                    dd { (format!("{descent:.0} ft")) }
                }
                @if let Some(status) = trail.condition_status() {
                    dt { "Conditions" }
                    dd {
                        (status)
                        @if let Some(details) = trail.condition_details() {
                            " (" (details) ")"
                        }
                    }
                }
            }
        }
    }
}

fn difficulty_legend() -> Markup {
    html! {
        ul class="legend" {
            @for difficulty in Difficulty::all() {
                li class=(difficulty.code()) { (difficulty.label()) }
            }
        }
    }
}

pub fn error_page(err: &TrailFinderError) -> Markup {
    page(
        "Something went wrong",
        None,
        html! {
            h1 { "Something went wrong" }
            p { (err.user_message()) }
            pre class="error" { (err.to_string()) }
            a href="/" { "Back to search" }
        },
    )
}

/// Make JSON safe to embed in a `<script>` element
fn escape_script_json(raw: &str) -> String {
    raw.replace("</", "<\\/")
}
