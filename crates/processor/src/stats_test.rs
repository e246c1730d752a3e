#[cfg(test)]
mod tests {
    use crate::stats::aggregate;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use common::models::{
        ActivitySnapshot, ContributionCalendar, ContributionDay, ContributionWeek, Issue,
        IssueState, PrState, PullRequest, RepoRef,
    };

    // Thursday 2026-01-15; week started Sunday 2026-01-11.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn repo() -> RepoRef {
        RepoRef {
            name_with_owner: "octocat/hello".to_string(),
            url: "https://github.com/octocat/hello".to_string(),
        }
    }

    fn make_pr(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> PullRequest {
        PullRequest {
            number: 1,
            title: "Test PR".to_string(),
            state: PrState::Open,
            review_decision: None,
            repo: repo(),
            created_at,
            updated_at,
            comments_count: 0,
            reviews_count: 0,
        }
    }

    fn make_issue(updated_at: DateTime<Utc>) -> Issue {
        Issue {
            number: 1,
            title: "Test issue".to_string(),
            state: IssueState::Open,
            repo: repo(),
            updated_at,
            comments_count: 0,
        }
    }

    fn calendar(start: NaiveDate, counts: &[u32]) -> ContributionCalendar {
        let days: Vec<ContributionDay> = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ContributionDay {
                date: start + Duration::days(i as i64),
                contribution_count: c,
                color: String::new(),
            })
            .collect();
        ContributionCalendar {
            total_contributions: counts.iter().sum(),
            weeks: days
                .chunks(7)
                .map(|chunk| ContributionWeek {
                    days: chunk.to_vec(),
                })
                .collect(),
        }
    }

    fn snapshot(
        cal: ContributionCalendar,
        prs: Vec<PullRequest>,
        reviewed: Vec<PullRequest>,
        commented: Vec<PullRequest>,
        issues: Vec<Issue>,
    ) -> ActivitySnapshot {
        ActivitySnapshot {
            calendar: cal,
            pull_requests: prs,
            reviewed_prs: reviewed,
            commented_prs: commented,
            issues,
            reviews: 0,
            fetched_at: now(),
        }
    }

    fn empty_calendar() -> ContributionCalendar {
        ContributionCalendar {
            total_contributions: 0,
            weeks: vec![],
        }
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let snap = snapshot(empty_calendar(), vec![], vec![], vec![], vec![]);
        let stats = aggregate(&snap, now());
        assert_eq!(stats, Default::default());
    }

    #[test]
    fn test_pr_counted_by_created_at() {
        // One PR this week, one in the previous week
        let this_week = Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap();
        let last_week = Utc.with_ymd_and_hms(2026, 1, 7, 9, 0, 0).unwrap();
        let snap = snapshot(
            empty_calendar(),
            vec![
                make_pr(this_week, this_week),
                make_pr(last_week, last_week),
            ],
            vec![],
            vec![],
            vec![],
        );

        let stats = aggregate(&snap, now());
        assert_eq!(stats.current_week.pull_requests, 1);
        assert_eq!(stats.previous_week.pull_requests, 1);
        // Both were created in January, so both land in the current month.
        assert_eq!(stats.current_month.pull_requests, 2);
        assert_eq!(stats.previous_month.pull_requests, 0);
    }

    #[test]
    fn test_week_and_month_windows_both_count_the_same_pr() {
        // No deduplication across windows
        let created = Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap();
        let snap = snapshot(
            empty_calendar(),
            vec![make_pr(created, created)],
            vec![],
            vec![],
            vec![],
        );

        let stats = aggregate(&snap, now());
        assert_eq!(stats.current_week.pull_requests, 1);
        assert_eq!(stats.current_month.pull_requests, 1);
    }

    #[test]
    fn test_window_start_boundary_is_inclusive() {
        let week_start = Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap();
        let snap = snapshot(
            empty_calendar(),
            vec![make_pr(week_start, week_start)],
            vec![],
            vec![],
            vec![],
        );

        let stats = aggregate(&snap, now());
        assert_eq!(stats.current_week.pull_requests, 1);
        assert_eq!(stats.previous_week.pull_requests, 0);
    }

    #[test]
    fn test_commits_summed_from_calendar_per_window() {
        // Jan 9-10 are previous week, Jan 11-15 current week; all in January.
        let cal = calendar(
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
            &[2, 3, 1, 0, 4, 0, 5],
        );
        let snap = snapshot(cal, vec![], vec![], vec![], vec![]);

        let stats = aggregate(&snap, now());
        assert_eq!(stats.previous_week.commits, 5);
        assert_eq!(stats.current_week.commits, 10);
        assert_eq!(stats.current_month.commits, 15);
        assert_eq!(stats.previous_month.commits, 0);
    }

    #[test]
    fn test_issues_reviews_comments_counted_by_updated_at() {
        let this_week = Utc.with_ymd_and_hms(2026, 1, 13, 10, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        let snap = snapshot(
            empty_calendar(),
            vec![],
            vec![
                make_pr(last_month, this_week),
                make_pr(last_month, last_month),
            ],
            vec![make_pr(last_month, this_week)],
            vec![make_issue(this_week), make_issue(last_month)],
        );

        let stats = aggregate(&snap, now());
        assert_eq!(stats.current_week.reviews, 1);
        assert_eq!(stats.previous_month.reviews, 1);
        assert_eq!(stats.current_week.comments, 1);
        assert_eq!(stats.current_week.issues, 1);
        assert_eq!(stats.previous_month.issues, 1);
    }

    #[test]
    fn test_pr_count_never_exceeds_list_length() {
        let created = Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap();
        let prs: Vec<PullRequest> = (0..3).map(|_| make_pr(created, created)).collect();
        let snap = snapshot(empty_calendar(), prs.clone(), vec![], vec![], vec![]);

        let stats = aggregate(&snap, now());
        for period in [
            stats.current_week,
            stats.previous_week,
            stats.current_month,
            stats.previous_month,
        ] {
            assert!(period.pull_requests as usize <= prs.len());
        }
    }

    #[test]
    fn test_week_boundary_crossing_shifts_counts_deterministically() {
        let created = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        let snap = snapshot(
            empty_calendar(),
            vec![make_pr(created, created)],
            vec![],
            vec![],
            vec![],
        );

        let before = aggregate(&snap, now());
        assert_eq!(before.current_week.pull_requests, 1);
        assert_eq!(before.previous_week.pull_requests, 0);

        // Same snapshot evaluated after the next Sunday began
        let next_week = Utc.with_ymd_and_hms(2026, 1, 19, 9, 0, 0).unwrap();
        let after = aggregate(&snap, next_week);
        assert_eq!(after.current_week.pull_requests, 0);
        assert_eq!(after.previous_week.pull_requests, 1);
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let created = Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap();
        let cal = calendar(NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(), &[1, 2, 3]);
        let snap = snapshot(
            cal,
            vec![make_pr(created, created)],
            vec![],
            vec![],
            vec![make_issue(created)],
        );

        assert_eq!(aggregate(&snap, now()), aggregate(&snap, now()));
    }
}
