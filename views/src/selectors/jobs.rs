use std::cmp::Reverse;
use std::sync::Arc;

use crate::state::{GlobalState, IdMap, Job};
use crate::views::Views;

pub fn get_jobs(state: &GlobalState) -> &Arc<IdMap<Job>> {
    &state.entities.jobs.jobs
}

pub fn get_job<'a>(state: &'a GlobalState, job_id: &str) -> Option<&'a Job> {
    get_jobs(state).get(job_id)
}

impl Views {
    /// Jobs of one type, newest first.
    pub fn jobs_by_type(&self, state: &GlobalState, job_type: &str) -> Arc<Vec<Job>> {
        self.jobs_by_type
            .get(&job_type.to_string(), Arc::clone(get_jobs(state)), |jobs| {
                let mut matching: Vec<Job> = jobs
                    .values()
                    .filter(|j| j.job_type == job_type)
                    .cloned()
                    .collect();
                matching.sort_by_key(|j| Reverse(j.create_at));
                matching
            })
    }
}
