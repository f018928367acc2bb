#[cfg(test)]
mod common;

#[cfg(test)]
mod health_tests;


#[cfg(test)]
mod case_list_tests;

#[cfg(test)]
mod case_detail_tests;

#[cfg(test)]
mod analytics_tests;


#[cfg(test)]
mod dataset_load_tests;
