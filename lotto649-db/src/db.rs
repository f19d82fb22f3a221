use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::models::{Draw, PICK_COUNT};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT NOT NULL,
    number_1  INTEGER NOT NULL,
    number_2  INTEGER NOT NULL,
    number_3  INTEGER NOT NULL,
    number_4  INTEGER NOT NULL,
    number_5  INTEGER NOT NULL,
    number_6  INTEGER NOT NULL,
    bonus     INTEGER NOT NULL
);
";

/// Opens the draw store. It lives only as long as the connection.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .context("Unable to open the in-memory draw store")?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Migration failed")?;
    Ok(())
}

/// Appends a draw and returns its row id. Draws are never updated or deleted.
pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<i64> {
    conn.execute(
        "INSERT INTO draws (date, number_1, number_2, number_3, number_4, number_5, number_6, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            draw.date,
            draw.numbers[0],
            draw.numbers[1],
            draw.numbers[2],
            draw.numbers[3],
            draw.numbers[4],
            draw.numbers[5],
            draw.bonus,
        ],
    ).context("Insert failed")?;
    Ok(conn.last_insert_rowid())
}

/// All draws in insertion order.
pub fn fetch_draws(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT date, number_1, number_2, number_3, number_4, number_5, number_6, bonus
         FROM draws ORDER BY id ASC"
    )?;
    let draws = stmt.query_map([], |row| {
        Ok(Draw {
            date: row.get(0)?,
            numbers: [
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
            ],
            bonus: row.get(7)?,
        })
    })?.collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

/// Main numbers of every draw in insertion order, bonus left out.
pub fn fetch_draws_numbers(conn: &Connection) -> Result<Vec<[u8; PICK_COUNT]>> {
    let mut stmt = conn.prepare(
        "SELECT number_1, number_2, number_3, number_4, number_5, number_6
         FROM draws ORDER BY id ASC"
    )?;
    let rows = stmt.query_map([], |row| {
        Ok([
            row.get::<_, u8>(0)?,
            row.get::<_, u8>(1)?,
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
        ])
    })?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_draw(day: u32, numbers: [u8; PICK_COUNT], bonus: u8) -> Draw {
        Draw {
            date: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            numbers,
            bonus,
        }
    }

    fn store() -> Connection {
        let conn = open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_count() {
        let conn = store();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw(1, [1, 2, 3, 4, 5, 6], 7)).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_identical_draws_are_both_kept() {
        let conn = store();
        let draw = test_draw(1, [1, 2, 3, 4, 5, 6], 7);

        let first = insert_draw(&conn, &draw).unwrap();
        let second = insert_draw(&conn, &draw).unwrap();
        assert_ne!(first, second);
        assert_eq!(count_draws(&conn).unwrap(), 2);
    }

    #[test]
    fn test_fetch_keeps_insertion_order() {
        let conn = store();

        insert_draw(&conn, &test_draw(5, [10, 11, 12, 13, 14, 15], 1)).unwrap();
        insert_draw(&conn, &test_draw(1, [1, 2, 3, 4, 5, 6], 7)).unwrap();
        insert_draw(&conn, &test_draw(3, [20, 21, 22, 23, 24, 25], 9)).unwrap();

        let draws = fetch_draws(&conn).unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].numbers, [10, 11, 12, 13, 14, 15]);
        assert_eq!(draws[1].bonus, 7);
        assert_eq!(draws[2].date, test_draw(3, [0; 6], 0).date);
    }

    #[test]
    fn test_fetch_numbers_excludes_bonus() {
        let conn = store();
        insert_draw(&conn, &test_draw(1, [1, 1, 2, 3, 4, 5], 6)).unwrap();

        let rows = fetch_draws_numbers(&conn).unwrap();
        assert_eq!(rows, vec![[1, 1, 2, 3, 4, 5]]);
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let conn = store();
        assert!(fetch_draws(&conn).unwrap().is_empty());
        assert!(fetch_draws_numbers(&conn).unwrap().is_empty());
    }
}
