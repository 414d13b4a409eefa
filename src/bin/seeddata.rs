//! Inserts the sample surveys into an empty database. Intended for local
//! development; the server itself never seeds data.

use canvass::MIGRATIONS;
use canvass::schema::survey_entries;
use chrono::Utc;
use clap::Parser;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use uuid::Uuid;

#[derive(Parser)]
struct Seed {
    database_url: Option<String>,
}

const SAMPLES: &[(&str, &str, &str, &str)] = &[
    (
        "Customer Satisfaction Survey",
        "Help us improve our services by providing your valuable feedback",
        "[\"How satisfied are you with our product quality?\", \"How likely are you to recommend us to others?\", \"What aspects of our service could be improved?\", \"How would you rate our customer support?\"]",
        "admin@company.com",
    ),
    (
        "Employee Engagement Survey",
        "Annual survey to understand employee satisfaction and engagement levels",
        "[\"How satisfied are you with your current role?\", \"How would you rate the work-life balance?\", \"Do you feel valued and recognized at work?\", \"What would improve your job satisfaction?\", \"How would you rate the company culture?\"]",
        "hr@company.com",
    ),
    (
        "Product Feedback Survey",
        "Share your thoughts about our latest product features",
        "[\"Which features do you find most useful?\", \"What additional features would you like to see?\", \"How intuitive is the user interface?\", \"What problems have you encountered?\", \"How would you rate the overall product experience?\"]",
        "product@company.com",
    ),
];

fn main() {
    let args = Seed::parse();
    let db_url = if let Some(url) = args.database_url {
        url
    } else {
        std::env::var("DATABASE_URL").expect(
            "please either set `DATABASE_URL` or pass the database url as an argument",
        )
    };

    let mut conn = diesel::SqliteConnection::establish(&db_url).unwrap();

    conn.run_pending_migrations(MIGRATIONS).unwrap();

    if survey_entries::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap()
        > 0
    {
        println!("surveys already exist, skipping sample data");
        return;
    }

    for &(title, description, questions, creator) in SAMPLES {
        diesel::insert_into(survey_entries::table)
            .values((
                survey_entries::id.eq(Uuid::now_v7().to_string()),
                survey_entries::title.eq(title),
                survey_entries::description.eq(description),
                survey_entries::questions_json.eq(questions),
                survey_entries::responses_json.eq("[]"),
                survey_entries::creator_email.eq(creator),
                survey_entries::status.eq("ACTIVE"),
                survey_entries::created_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .unwrap();

        println!("created sample survey: {title}");
    }
}
