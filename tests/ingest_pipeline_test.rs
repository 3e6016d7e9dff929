use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use social_pulse::config::Config;
use social_pulse::error::IngestError;
use social_pulse::pipeline::encoding::TextEncoding;
use social_pulse::pipeline::writer::TableWriter;
use social_pulse::pipeline::Pipeline;
use social_pulse::stats;
use social_pulse::types::SentimentLabel;

/// 10 raw records: 3 negative (0), 3 neutral (2), 4 positive (4).
/// Text fields carry hashtags and one Latin-1 byte (0xE9, "é").
fn sample_dataset() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(
        b"0,1,Mon Apr 06 22:19:45 PDT 2009,NO_QUERY,ann,\"worst day, ugh #fail\"\n\
          0,2,Mon Apr 06 23:00:00 PDT 2009,NO_QUERY,bob,so slow today #fail #Fail\n\
          0,3,Tue Apr 07 08:15:00 PDT 2009,NO_QUERY,cat,battery died again\n\
          2,4,Tue Apr 07 09:00:00 PDT 2009,NO_QUERY,dan,nothing to report\n\
          2,5,Fri May 01 10:00:00 PDT 2009,NO_QUERY,eve,waiting for the update\n\
          2,6,Fri May 01 11:30:00 PDT 2009,NO_QUERY,fay,meh\n\
          4,7,Sat May 02 12:00:00 PDT 2009,NO_QUERY,gus,Loving the #NewPhone! #tech\n\
          4,8,Sat May 02 13:45:00 PDT 2009,NO_QUERY,hal,best purchase ever #NewPhone\n",
    );
    // one row with a Latin-1 e-acute in the text
    data.extend_from_slice(b"4,9,Sun May 03 14:00:00 PDT 2009,NO_QUERY,ida,caf\xe9 vibes #tech\n");
    data.extend_from_slice(b"4,10,Sun May 03 15:30:00 PDT 2009,NO_QUERY,joe,smooth and fast\n");
    data
}

fn test_config(dir: &std::path::Path, sample_size: usize) -> Config {
    let input = dir.join("posts.csv");
    Config {
        input,
        database: dir.join("social.db"),
        table: "posts".to_string(),
        sample_size,
        encoding: TextEncoding::Latin1,
        seed: None,
    }
}

#[test]
fn end_to_end_ingest_preserves_sentiment_distribution() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;
    let config = test_config(temp_dir.path(), 10);

    let summary = Pipeline::run(&config)?;
    assert_eq!(summary.rows_read, 10);
    assert_eq!(summary.rows_written, 10);
    assert_eq!(summary.rows_unmapped_sentiment, 0);

    let writer = TableWriter::open(&config.database, &config.table)?;
    let posts = writer.read_all()?;
    assert_eq!(posts.len(), 10);

    let counts = stats::SentimentCounts::tally(&posts);
    assert_eq!(counts.negative, 3);
    assert_eq!(counts.neutral, 3);
    assert_eq!(counts.positive, 4);
    assert_eq!(counts.unknown, 0);

    // the Latin-1 byte decoded to a real é, and hashtags were lowercased
    let cafe = posts.iter().find(|p| p.id == "9").unwrap();
    assert_eq!(cafe.text, "café vibes #tech");
    assert_eq!(cafe.hashtags, "#tech");
    let dup = posts.iter().find(|p| p.id == "2").unwrap();
    assert_eq!(dup.hashtags, "#fail,#fail");

    Ok(())
}

#[test]
fn sampling_bounds_the_output_table() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;
    let config = test_config(temp_dir.path(), 4);

    let summary = Pipeline::run(&config)?;
    assert_eq!(summary.rows_read, 10);
    assert_eq!(summary.rows_written, 4);

    let writer = TableWriter::open(&config.database, &config.table)?;
    let posts = writer.read_all()?;
    assert_eq!(posts.len(), 4);

    // sampled without replacement: all ids distinct
    let mut ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);

    Ok(())
}

#[test]
fn oversized_sample_aborts_before_touching_the_table() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;

    // a prior successful run populates the table
    let config = test_config(temp_dir.path(), 10);
    Pipeline::run(&config)?;

    let config = test_config(temp_dir.path(), 11);
    let err = Pipeline::run(&config).unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidSampleSize {
            requested: 11,
            available: 10
        }
    ));

    // the previous table is still fully intact
    let writer = TableWriter::open(&config.database, &config.table)?;
    assert_eq!(writer.read_all()?.len(), 10);

    Ok(())
}

#[test]
fn malformed_row_fails_the_whole_run() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut data = sample_dataset();
    data.extend_from_slice(b"4,11,only,four,fields\n");
    fs::write(temp_dir.path().join("posts.csv"), data)?;
    let config = test_config(temp_dir.path(), 5);

    let err = Pipeline::run(&config).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MalformedRecord {
            line: 11,
            fields: 5
        }
    ));

    // nothing was ingested
    assert!(!config.database.exists() || {
        let writer = TableWriter::open(&config.database, &config.table)?;
        writer.read_all().is_err()
    });

    Ok(())
}

#[test]
fn reruns_replace_rather_than_append() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;

    let config = test_config(temp_dir.path(), 10);
    Pipeline::run(&config)?;
    Pipeline::run(&config)?;

    let writer = TableWriter::open(&config.database, &config.table)?;
    // two runs never coexist: still exactly one dataset's worth of rows
    assert_eq!(writer.read_all()?.len(), 10);

    Ok(())
}

#[test]
fn seeded_runs_write_identical_samples() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;

    let mut config = test_config(temp_dir.path(), 6);
    config.seed = Some(1234);

    Pipeline::run(&config)?;
    let writer = TableWriter::open(&config.database, &config.table)?;
    let first = writer.read_all()?;
    drop(writer);

    Pipeline::run(&config)?;
    let writer = TableWriter::open(&config.database, &config.table)?;
    let second = writer.read_all()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn dashboard_aggregates_read_cleanly_from_the_table() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("posts.csv"), sample_dataset())?;
    let config = test_config(temp_dir.path(), 10);
    Pipeline::run(&config)?;

    let writer = TableWriter::open(&config.database, &config.table)?;
    let posts = writer.read_all()?;

    let monthly = stats::monthly_counts(&posts);
    assert_eq!(
        monthly,
        vec![("2009-04".to_string(), 4), ("2009-05".to_string(), 6)]
    );

    let top = stats::top_hashtags(&posts, 3);
    assert_eq!(top[0], ("#fail".to_string(), 3));
    // #newphone and #tech both appear twice; ties rank alphabetically
    assert_eq!(top[1], ("#newphone".to_string(), 2));
    assert_eq!(top[2], ("#tech".to_string(), 2));

    // "phone" matches inside #newphone too; substring search is permissive
    let matches = stats::keyword_matches(&posts, "loving the phone");
    assert_eq!(matches.len(), 2);
    assert!(matches
        .iter()
        .all(|p| p.sentiment_label == SentimentLabel::Positive));

    Ok(())
}

#[test]
fn cli_style_path_overrides_apply() -> Result<()> {
    // the config type itself is plain data; overriding fields is what the
    // CLI layer does before handing it to the pipeline
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("other.csv"), sample_dataset())?;

    let mut config = test_config(temp_dir.path(), 10);
    config.input = temp_dir.path().join("other.csv");
    config.table = "posts_v2".to_string();

    let summary = Pipeline::run(&config)?;
    assert_eq!(summary.table, "posts_v2");

    let writer = TableWriter::open(&config.database, "posts_v2")?;
    assert_eq!(writer.read_all()?.len(), 10);
    Ok(())
}
