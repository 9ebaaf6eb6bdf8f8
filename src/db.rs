//! Journal schema and operations
//!
//! Saved plans and quick build templates are stored as JSON documents next
//! to the few columns used for listing. User builds get one column per
//! field so their status can be queried directly.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::info;

use crate::models::{BuildPlan, BuildStatus, UserBuild};
use crate::quick_builds::QuickBuild;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- Generated plans, kept verbatim
        CREATE TABLE IF NOT EXISTS plans (
            id TEXT PRIMARY KEY,
            project_name TEXT NOT NULL,
            estimated_cost INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            plan_json TEXT NOT NULL
        );

        -- A user's attempt at a saved plan
        CREATE TABLE IF NOT EXISTS user_builds (
            id TEXT PRIMARY KEY,
            plan_id TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
            status TEXT NOT NULL,
            start_date TEXT,
            completion_date TEXT,
            notes TEXT,
            actual_cost REAL,
            actual_time TEXT,
            rating INTEGER,
            review TEXT
        );

        -- Imported quick build templates
        CREATE TABLE IF NOT EXISTS quick_builds (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            template_json TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_user_builds_plan ON user_builds(plan_id);
        CREATE INDEX IF NOT EXISTS idx_user_builds_status ON user_builds(status);
        "#,
    )?;
    Ok(())
}

/// Listing row for a saved plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub id: String,
    pub project_name: String,
    pub estimated_cost: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert or replace a plan
pub fn save_plan(conn: &Connection, plan: &BuildPlan) -> Result<()> {
    let json = serde_json::to_string(plan).context("failed to serialize plan")?;
    conn.execute(
        "INSERT OR REPLACE INTO plans (id, project_name, estimated_cost, created_at, plan_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &plan.id,
            &plan.project_name,
            plan.estimated_cost,
            plan.created_at.to_rfc3339(),
            &json,
        ),
    )?;
    info!(plan_id = %plan.id, project = %plan.project_name, "saved plan");
    Ok(())
}

pub fn get_plan(conn: &Connection, id: &str) -> Result<Option<BuildPlan>> {
    let json: Option<String> = conn
        .query_row("SELECT plan_json FROM plans WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;

    json.map(|json| {
        serde_json::from_str(&json).with_context(|| format!("corrupt plan record {id}"))
    })
    .transpose()
}

/// List saved plans, newest first
pub fn list_plans(conn: &Connection) -> Result<Vec<PlanSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_name, estimated_cost, created_at FROM plans
         ORDER BY created_at DESC, id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let (id, project_name, estimated_cost, created_at) = row?;
        results.push(PlanSummary {
            created_at: parse_timestamp(&created_at)?,
            id,
            project_name,
            estimated_cost,
        });
    }
    Ok(results)
}

/// Delete a plan and the builds made from it. Returns false if it did not exist.
pub fn delete_plan(conn: &Connection, id: &str) -> Result<bool> {
    conn.execute("DELETE FROM user_builds WHERE plan_id = ?1", [id])?;
    let deleted = conn.execute("DELETE FROM plans WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}

/// Start tracking a build of a saved plan
pub fn create_build(conn: &Connection, build_id: String, plan_id: &str) -> Result<UserBuild> {
    if get_plan(conn, plan_id)?.is_none() {
        return Err(anyhow!("no saved plan with id {plan_id}"));
    }
    let build = UserBuild::new(build_id, plan_id.to_string());
    conn.execute(
        "INSERT INTO user_builds (id, plan_id, status) VALUES (?1, ?2, ?3)",
        (&build.id, &build.plan_id, build.status.as_str()),
    )?;
    info!(build_id = %build.id, plan_id, "started build record");
    Ok(build)
}

/// Write every mutable field of a build back to the journal
pub fn update_build(conn: &Connection, build: &UserBuild) -> Result<()> {
    let updated = conn.execute(
        "UPDATE user_builds
         SET status = ?2, start_date = ?3, completion_date = ?4, notes = ?5,
             actual_cost = ?6, actual_time = ?7, rating = ?8, review = ?9
         WHERE id = ?1",
        (
            &build.id,
            build.status.as_str(),
            build.start_date.map(|d| d.to_rfc3339()),
            build.completion_date.map(|d| d.to_rfc3339()),
            &build.notes,
            build.actual_cost,
            &build.actual_time,
            build.rating,
            &build.review,
        ),
    )?;
    if updated == 0 {
        return Err(anyhow!("no build with id {}", build.id));
    }
    Ok(())
}

const BUILD_COLUMNS: &str = "id, plan_id, status, start_date, completion_date, notes, \
    actual_cost, actual_time, rating, review";

/// Raw column values; timestamps and status are parsed outside the row callback
type BuildRow = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<f64>,
    Option<String>,
    Option<u8>,
    Option<String>,
);

fn read_build_row(row: &Row<'_>) -> rusqlite::Result<BuildRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn build_from_row(row: BuildRow) -> Result<UserBuild> {
    let (id, plan_id, status, start, completion, notes, actual_cost, actual_time, rating, review) =
        row;
    Ok(UserBuild {
        status: status.parse()?,
        start_date: start.as_deref().map(parse_timestamp).transpose()?,
        completion_date: completion.as_deref().map(parse_timestamp).transpose()?,
        id,
        plan_id,
        notes,
        actual_cost,
        actual_time,
        rating,
        review,
    })
}

pub fn get_build(conn: &Connection, id: &str) -> Result<Option<UserBuild>> {
    let row = conn
        .query_row(
            &format!("SELECT {BUILD_COLUMNS} FROM user_builds WHERE id = ?1"),
            [id],
            read_build_row,
        )
        .optional()?;
    row.map(build_from_row).transpose()
}

/// List builds, optionally only those in one status
pub fn list_builds(conn: &Connection, status: Option<BuildStatus>) -> Result<Vec<UserBuild>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BUILD_COLUMNS} FROM user_builds
         WHERE ?1 IS NULL OR status = ?1
         ORDER BY id"
    ))?;

    let rows = stmt.query_map([status.map(BuildStatus::as_str)], read_build_row)?;

    let mut results = Vec::new();
    for row in rows {
        results.push(build_from_row(row?)?);
    }
    Ok(results)
}

/// Insert or replace an imported quick build
pub fn upsert_quick_build(conn: &Connection, build: &QuickBuild) -> Result<()> {
    let json = serde_json::to_string(build).context("failed to serialize quick build")?;
    conn.execute(
        "INSERT OR REPLACE INTO quick_builds (id, name, category, template_json)
         VALUES (?1, ?2, ?3, ?4)",
        (&build.id, &build.name, &build.category, &json),
    )?;
    Ok(())
}

/// All imported quick builds, ordered by id
pub fn list_quick_builds(conn: &Connection) -> Result<Vec<QuickBuild>> {
    let mut stmt = conn.prepare("SELECT id, template_json FROM quick_builds ORDER BY id")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let (id, json) = row?;
        let build = serde_json::from_str(&json)
            .with_context(|| format!("corrupt quick build record {id}"))?;
        results.push(build);
    }
    Ok(results)
}

pub fn get_quick_build(conn: &Connection, id: &str) -> Result<Option<QuickBuild>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT template_json FROM quick_builds WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .optional()?;

    json.map(|json| {
        serde_json::from_str(&json).with_context(|| format!("corrupt quick build record {id}"))
    })
    .transpose()
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("bad timestamp {text:?} in journal"))?
        .with_timezone(&Utc))
}
